pub mod block;
pub mod miner;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use model::{ChainSnapshot, Ledger};

/// Proof-of-Work difficulty: a valid guess hash starts with this prefix (16 bits of zeros).
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Fixed, unmined proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel stored in the genesis block's `previous_hash` (not a real hash).
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Sender used for the mining reward; "0" marks newly minted coins.
pub const MINING_REWARD_SENDER: &str = "0";

/// Reward paid to the node that seals a block.
pub const MINING_REWARD: f64 = 1.0;

/// How many candidates the cancellable search tries between cancellation checks.
pub const CANCEL_CHECK_INTERVAL: u64 = 4096;
