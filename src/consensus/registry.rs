use std::collections::BTreeSet;

use crate::error::{LedgerError, Result};

/// Set of peer addresses (`host:port`) this node consults during resolution.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    nodes: BTreeSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            nodes: BTreeSet::new(),
        }
    }

    /// Register a peer. Accepts `host:port` or a URL like `http://host:port/`.
    /// Returns `false` when the address was already known.
    pub fn register(&mut self, address: &str) -> Result<bool> {
        let normalized = normalize_address(address);
        if normalized.is_empty() {
            return Err(LedgerError::EmptyNodeAddress);
        }
        Ok(self.nodes.insert(normalized.to_string()))
    }

    /// Register a batch of peers, all or nothing: if any address is empty
    /// the registry is left untouched. Returns the addresses that were new.
    pub fn register_all<S: AsRef<str>>(&mut self, addresses: &[S]) -> Result<Vec<String>> {
        let normalized = addresses
            .iter()
            .map(|a| match normalize_address(a.as_ref()) {
                "" => Err(LedgerError::EmptyNodeAddress),
                n => Ok(n.to_string()),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(normalized
            .into_iter()
            .filter(|n| self.nodes.insert(n.clone()))
            .collect())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Strip an optional scheme and any path, keeping the authority part.
fn normalize_address(address: &str) -> &str {
    let trimmed = address.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .trim()
}
