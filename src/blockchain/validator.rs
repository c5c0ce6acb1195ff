use log::debug;

use super::{Block, pow};
use crate::error::{LedgerError, Result};

/// Validate an entire chain: positions, hash linkage and proof-of-work.
///
/// Every block after genesis must point at the hash of its predecessor and
/// carry a proof that verifies against the predecessor's proof *and* hash.
/// The genesis block itself is not mined and is accepted as-is.
pub fn check_chain(chain: &[Block]) -> Result<()> {
    if chain.is_empty() {
        return Err(LedgerError::EmptyChain);
    }

    for (position, block) in chain.iter().enumerate() {
        if block.index != position as u64 + 1 {
            return Err(LedgerError::InvalidChain {
                index: block.index,
                reason: "index does not match position in chain",
            });
        }
    }

    for pair in chain.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let prev_hash = prev.hash();

        if curr.previous_hash != prev_hash {
            return Err(LedgerError::InvalidChain {
                index: curr.index,
                reason: "previous_hash does not match hash of preceding block",
            });
        }

        if !pow::verify(prev.proof, curr.proof, &prev_hash) {
            return Err(LedgerError::InvalidChain {
                index: curr.index,
                reason: "proof of work does not verify",
            });
        }
    }

    Ok(())
}

pub fn is_valid(chain: &[Block]) -> bool {
    match check_chain(chain) {
        Ok(()) => true,
        Err(e) => {
            debug!("chain rejected: {e}");
            false
        }
    }
}
