use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::blockchain::{Block, Ledger};
use crate::config::Config;
use crate::consensus::{HttpPeerClient, Resolver};
use crate::error::Result;
use crate::transaction::Transaction;

/// Shared application state: the ledger behind one lock, plus node identity and the resolver.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub node_id: String,
    pub resolver: Resolver<HttpPeerClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let mut ledger = Ledger::new();
        for peer in &config.peers {
            if let Err(e) = ledger.register_node(peer) {
                warn!("ignoring configured peer {peer:?}: {e}");
            }
        }

        Ok(Self {
            ledger: Mutex::new(ledger),
            node_id: config.node_id.clone(),
            resolver: Resolver::new(HttpPeerClient::new(config.peer_timeout)?),
        })
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub height: usize,
    pub pending: usize,
    pub peers: usize,
}

#[derive(Serialize, Deserialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Forged".to_string(),
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

#[derive(Serialize, Deserialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize, Deserialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ResolveResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
}
