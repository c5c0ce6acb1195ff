use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// A single block in the chain holding a batch of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // Unix seconds (UTC), microsecond resolution
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    pub fn new(
        index: u64,
        timestamp: f64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp,
            transactions,
            proof,
            previous_hash,
        }
    }

    /// SHA-256 of the block's canonical JSON form, hex encoded.
    ///
    /// The block goes through `serde_json::Value` first: its object map is
    /// key-sorted, so the preimage does not depend on field declaration
    /// order or on the key order of a block received from a peer.
    pub fn hash(&self) -> String {
        let canonical = serde_json::to_value(self).expect("block is always serializable");
        let mut hasher = Sha256::new();
        hasher.update(canonical.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Current wall clock as fractional Unix seconds.
pub fn now_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Block {
        Block::new(
            2,
            1_700_000_000.25,
            vec![
                Transaction::new("alice", "bob", 5.0),
                Transaction::new("bob", "carol", 0.5),
            ],
            35_293,
            "ab".repeat(32),
        )
    }

    #[test]
    fn hash_is_deterministic_hex() {
        let b = sample();
        let h = b.hash();
        assert_eq!(h, b.clone().hash());
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_ignores_json_key_order() {
        let shuffled = r#"{
            "previous_hash": "abababababababababababababababababababababababababababababababab",
            "proof": 35293,
            "transactions": [
                {"amount": 5.0, "recipient": "bob", "sender": "alice"},
                {"recipient": "carol", "sender": "bob", "amount": 0.5}
            ],
            "timestamp": 1700000000.25,
            "index": 2
        }"#;
        let parsed: Block = serde_json::from_str(shuffled).unwrap();
        assert_eq!(parsed.hash(), sample().hash());
    }

    #[test]
    fn hash_preimage_is_compact_json_with_sorted_keys() {
        let canonical = format!(
            concat!(
                r#"{{"index":2,"previous_hash":"{}","proof":35293,"timestamp":1700000000.25,"#,
                r#""transactions":[{{"amount":5.0,"recipient":"bob","sender":"alice"}},"#,
                r#"{{"amount":0.5,"recipient":"carol","sender":"bob"}}]}}"#
            ),
            "ab".repeat(32)
        );
        let expected = hex::encode(Sha256::digest(canonical.as_bytes()));
        assert_eq!(sample().hash(), expected);
    }

    #[test]
    fn hash_changes_when_mutated() {
        let b = sample();
        let mut tampered = b.clone();
        tampered.transactions[0].amount = 500.0;
        assert_ne!(b.hash(), tampered.hash());

        let mut reproofed = b.clone();
        reproofed.proof += 1;
        assert_ne!(b.hash(), reproofed.hash());
    }

    #[test]
    fn hash_survives_json_round_trip() {
        let b = Block::new(1, now_timestamp(), vec![], 100, "1".into());
        let wire = serde_json::to_string(&b).unwrap();
        let back: Block = serde_json::from_str(&wire).unwrap();
        assert_eq!(back.hash(), b.hash());
    }
}
