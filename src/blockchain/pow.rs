use sha2::{Digest, Sha256};

use super::{CANCEL_CHECK_INTERVAL, DIFFICULTY_PREFIX};

/// Check whether `proof` seals a block on top of one with `last_proof` and `last_hash`:
/// sha256("{last_proof}{proof}{last_hash}") must start with `DIFFICULTY_PREFIX` in hex.
pub fn verify(last_proof: u64, proof: u64, last_hash: &str) -> bool {
    let guess = format!("{last_proof}{proof}{last_hash}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    hex::encode(hasher.finalize()).starts_with(DIFFICULTY_PREFIX)
}

/// Linear search from 0 for the smallest proof accepted by `verify`.
/// Unbounded and CPU-bound; never call it while holding the ledger lock.
pub fn solve(last_proof: u64, last_hash: &str) -> u64 {
    let mut proof = 0;
    while !verify(last_proof, proof, last_hash) {
        proof += 1;
    }
    proof
}

/// Same search as [`solve`], polling `cancelled` every `CANCEL_CHECK_INTERVAL`
/// candidates. Returns `None` as soon as the hook reports cancellation.
pub fn solve_cancellable<F>(last_proof: u64, last_hash: &str, mut cancelled: F) -> Option<u64>
where
    F: FnMut() -> bool,
{
    let mut proof = 0;
    loop {
        if proof % CANCEL_CHECK_INTERVAL == 0 && cancelled() {
            return None;
        }
        if verify(last_proof, proof, last_hash) {
            return Some(proof);
        }
        proof += 1;
    }
}
