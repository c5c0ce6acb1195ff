use serde::{Deserialize, Serialize};

use super::block::now_timestamp;
use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF, validator};
use crate::consensus::NodeRegistry;
use crate::error::{LedgerError, Result};
use crate::transaction::{Transaction, TransactionPool};

/// Chain export: the shape served on `/chain` and expected back from peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl ChainSnapshot {
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len();
        Self { chain, length }
    }
}

/// In-memory ledger: the chain, the pending pool and the peer registry.
/// Callers share it behind a single mutex.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pool: TransactionPool,
    nodes: NodeRegistry,
    version: u64,
}

impl Ledger {
    /// Initialize a new ledger with its genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pool: TransactionPool::new(),
            nodes: NodeRegistry::new(),
            version: 0,
        };
        ledger.genesis();
        ledger
    }

    fn genesis(&mut self) {
        let block = Block::new(
            1,
            now_timestamp(),
            self.pool.drain_all(),
            GENESIS_PROOF,
            GENESIS_PREVIOUS_HASH.to_string(),
        );
        self.chain.push(block);
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Append a block sealed by `proof`, embedding every pending transaction.
    /// `previous_hash` defaults to the hash of the current last block.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<String>) -> Result<&Block> {
        let last = self.last_block()?;
        let previous_hash = match previous_hash {
            Some(hash) => hash,
            None => last.hash(),
        };
        // never step back behind the parent's clock reading
        let timestamp = now_timestamp().max(last.timestamp);
        let index = self.chain.len() as u64 + 1;

        let block = Block::new(index, timestamp, self.pool.drain_all(), proof, previous_hash);
        self.chain.push(block);
        self.version += 1;
        self.last_block()
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn new_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: f64,
    ) -> Result<u64> {
        let next_index = self.last_block()?.index + 1;
        self.pool.add(Transaction::new(sender, recipient, amount));
        Ok(next_index)
    }

    /// Add a peer; duplicates are no-ops. Returns `true` if the peer is new.
    pub fn register_node(&mut self, address: &str) -> Result<bool> {
        self.nodes.register(address)
    }

    /// Add several peers at once; nothing is registered if any address is empty.
    pub fn register_nodes<S: AsRef<str>>(&mut self, addresses: &[S]) -> Result<Vec<String>> {
        self.nodes.register_all(addresses)
    }

    /// Swap the whole chain for one already accepted by the validator.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
        self.version += 1;
    }

    /// Self-check of the local chain.
    pub fn is_valid(&self) -> bool {
        validator::is_valid(&self.chain)
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot::new(self.chain.clone())
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn pending(&self) -> &[Transaction] {
        self.pool.pending()
    }

    pub fn pending_len(&self) -> usize {
        self.pool.len()
    }

    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }

    /// Bumped on every append or replacement; lets a miner notice that its tip moved.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
