use log::{debug, info};
use std::sync::Mutex;

use super::{Block, Ledger, MINING_REWARD, MINING_REWARD_SENDER, pow};
use crate::error::Result;

/// Mine exactly one block on top of the current tip and append it.
///
/// The tip is snapshotted under the lock and the proof search runs without
/// it, so submissions keep flowing. If the tip moves mid-search (another
/// block appended or the chain replaced by consensus) the search is abandoned
/// and restarted on the new tip. When `reward_recipient` is set, a reward
/// transaction is queued right before sealing so it lands in this block.
pub fn mine(ledger: &Mutex<Ledger>, reward_recipient: Option<&str>) -> Result<Block> {
    mine_with(ledger, reward_recipient, || {})
}

/// [`mine`] with a hook run at every cancellation poll of the search,
/// just before the ledger version is compared against the snapshot.
pub fn mine_with<H>(
    ledger: &Mutex<Ledger>,
    reward_recipient: Option<&str>,
    mut on_poll: H,
) -> Result<Block>
where
    H: FnMut(),
{
    loop {
        let (last_proof, last_hash, version) = {
            let l = ledger.lock().expect("mutex poisoned");
            let last = l.last_block()?;
            (last.proof, last.hash(), l.version())
        };

        let tip_moved = || {
            on_poll();
            ledger.lock().expect("mutex poisoned").version() != version
        };
        let Some(proof) = pow::solve_cancellable(last_proof, &last_hash, tip_moved) else {
            debug!("MINER - tip moved during search, restarting");
            continue;
        };

        let mut l = ledger.lock().expect("mutex poisoned");
        if l.version() != version {
            debug!("MINER - tip moved before sealing, restarting");
            continue;
        }
        if let Some(recipient) = reward_recipient {
            l.new_transaction(MINING_REWARD_SENDER, recipient, MINING_REWARD)?;
        }
        let block = l.new_block(proof, Some(last_hash))?.clone();
        info!(
            "MINER - sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        return Ok(block);
    }
}
