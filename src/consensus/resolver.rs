use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Mutex;

use super::peer::ChainFetcher;
use crate::blockchain::{Block, ChainSnapshot, Ledger, validator};
use crate::error::{LedgerError, Result};

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub replaced: bool,
    pub chain: Vec<Block>,
}

/// Longest-valid-chain consensus over the registered peers.
pub struct Resolver<F> {
    fetcher: F,
}

impl<F: ChainFetcher> Resolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Query every registered peer and adopt the longest valid chain that is
    /// strictly longer than ours. Ties keep the local chain.
    ///
    /// The ledger lock is only held to snapshot inputs and to swap the chain;
    /// peer requests run without it.
    pub async fn resolve(&self, ledger: &Mutex<Ledger>) -> Resolution {
        let (peers, local_length) = {
            let l = ledger.lock().expect("mutex poisoned");
            (l.nodes().to_vec(), l.len())
        };

        let candidate = self.find_longer_chain(&peers, local_length).await;

        let mut l = ledger.lock().expect("mutex poisoned");
        let replaced = match candidate {
            // the local chain may have grown while peers were queried
            Some(chain) if chain.len() > l.len() => {
                info!(
                    "CONSENSUS - replacing local chain ({} blocks) with peer chain ({} blocks)",
                    l.len(),
                    chain.len()
                );
                l.replace_chain(chain);
                true
            }
            Some(chain) => {
                debug!(
                    "CONSENSUS - candidate of {} blocks no longer beats local {}",
                    chain.len(),
                    l.len()
                );
                false
            }
            None => false,
        };

        Resolution {
            replaced,
            chain: l.chain().to_vec(),
        }
    }

    /// Pick the best candidate among `peers`, or `None` if nobody beats `local_length`.
    /// Peers that fail in any way contribute nothing to this pass.
    pub async fn find_longer_chain(&self, peers: &[String], local_length: usize) -> Option<Vec<Block>> {
        let mut max_length = local_length;
        let mut best = None;

        for peer in peers {
            let snapshot = match self.fetch_checked(peer).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("CONSENSUS - skipping peer {peer}: {e}");
                    continue;
                }
            };

            if snapshot.length > max_length && validator::is_valid(&snapshot.chain) {
                debug!(
                    "CONSENSUS - peer {peer} offers valid chain of {} blocks",
                    snapshot.length
                );
                max_length = snapshot.length;
                best = Some(snapshot.chain);
            } else {
                debug!(
                    "CONSENSUS - peer {peer} chain of {} blocks not adopted (best so far {max_length})",
                    snapshot.length
                );
            }
        }

        best
    }

    async fn fetch_checked(&self, peer: &str) -> Result<ChainSnapshot> {
        let snapshot = self.fetcher.fetch_chain(peer).await?;
        if snapshot.length != snapshot.chain.len() {
            return Err(LedgerError::MalformedPeerResponse {
                peer: peer.to_string(),
                reason: format!(
                    "reported length {} but sent {} blocks",
                    snapshot.length,
                    snapshot.chain.len()
                ),
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::pow;
    use std::collections::HashMap;

    enum Reply {
        Chain(ChainSnapshot),
        Unreachable,
        Malformed,
    }

    struct FakePeers(HashMap<String, Reply>);

    impl ChainFetcher for FakePeers {
        async fn fetch_chain(&self, address: &str) -> Result<ChainSnapshot> {
            match self.0.get(address) {
                Some(Reply::Chain(snapshot)) => Ok(snapshot.clone()),
                Some(Reply::Malformed) => Err(LedgerError::MalformedPeerResponse {
                    peer: address.to_string(),
                    reason: "missing field `chain`".into(),
                }),
                Some(Reply::Unreachable) | None => Err(LedgerError::UnreachablePeer {
                    peer: address.to_string(),
                    reason: "connection refused".into(),
                }),
            }
        }
    }

    fn grow(ledger: &mut Ledger, target_len: usize) {
        while ledger.len() < target_len {
            ledger.new_transaction("alice", "bob", 1.0).unwrap();
            let last = ledger.last_block().unwrap();
            let proof = pow::solve(last.proof, &last.hash());
            ledger.new_block(proof, None).unwrap();
        }
    }

    fn valid_chain(len: usize) -> ChainSnapshot {
        let mut ledger = Ledger::new();
        grow(&mut ledger, len);
        ledger.snapshot()
    }

    fn invalid_chain(len: usize) -> ChainSnapshot {
        let mut snapshot = valid_chain(len);
        snapshot.chain[1].previous_hash = "forged".into();
        snapshot
    }

    fn local_ledger(len: usize, peers: &[&str]) -> Mutex<Ledger> {
        let mut ledger = Ledger::new();
        grow(&mut ledger, len);
        for peer in peers {
            ledger.register_node(peer).unwrap();
        }
        Mutex::new(ledger)
    }

    fn resolver(replies: Vec<(&str, Reply)>) -> Resolver<FakePeers> {
        Resolver::new(FakePeers(
            replies
                .into_iter()
                .map(|(peer, reply)| (peer.to_string(), reply))
                .collect(),
        ))
    }

    #[actix_web::test]
    async fn adopts_strictly_longer_valid_chain() {
        let ledger = local_ledger(4, &["a:5000", "b:5000"]);
        let longest = valid_chain(5);
        let resolver = resolver(vec![
            ("a:5000", Reply::Chain(valid_chain(3))),
            ("b:5000", Reply::Chain(longest.clone())),
        ]);

        let outcome = resolver.resolve(&ledger).await;
        assert!(outcome.replaced);
        assert_eq!(outcome.chain, longest.chain);
        assert_eq!(ledger.lock().unwrap().chain(), longest.chain.as_slice());
    }

    #[actix_web::test]
    async fn invalid_longer_chain_is_never_adopted() {
        let ledger = local_ledger(4, &["a:5000", "b:5000"]);
        let before = ledger.lock().unwrap().chain().to_vec();
        let resolver = resolver(vec![
            ("a:5000", Reply::Chain(valid_chain(3))),
            ("b:5000", Reply::Chain(invalid_chain(5))),
        ]);

        let outcome = resolver.resolve(&ledger).await;
        assert!(!outcome.replaced);
        assert_eq!(outcome.chain, before);
    }

    #[actix_web::test]
    async fn equal_length_keeps_local_chain() {
        let ledger = local_ledger(3, &["a:5000"]);
        let before = ledger.lock().unwrap().chain().to_vec();
        let resolver = resolver(vec![("a:5000", Reply::Chain(valid_chain(3)))]);

        let outcome = resolver.resolve(&ledger).await;
        assert!(!outcome.replaced);
        assert_eq!(ledger.lock().unwrap().chain(), before.as_slice());
    }

    #[actix_web::test]
    async fn longest_of_several_valid_peers_wins() {
        let ledger = local_ledger(1, &["a:5000", "b:5000", "c:5000"]);
        let resolver = resolver(vec![
            ("a:5000", Reply::Chain(valid_chain(3))),
            ("b:5000", Reply::Chain(valid_chain(4))),
            ("c:5000", Reply::Chain(valid_chain(2))),
        ]);

        let outcome = resolver.resolve(&ledger).await;
        assert!(outcome.replaced);
        assert_eq!(outcome.chain.len(), 4);
    }

    #[actix_web::test]
    async fn failing_peers_are_skipped() {
        let ledger = local_ledger(2, &["down:5000", "junk:5000", "good:5000"]);
        let good = valid_chain(3);
        let resolver = resolver(vec![
            ("down:5000", Reply::Unreachable),
            ("junk:5000", Reply::Malformed),
            ("good:5000", Reply::Chain(good.clone())),
        ]);

        let outcome = resolver.resolve(&ledger).await;
        assert!(outcome.replaced);
        assert_eq!(outcome.chain, good.chain);
    }

    #[actix_web::test]
    async fn inflated_length_is_treated_as_malformed() {
        let ledger = local_ledger(3, &["liar:5000"]);
        let mut lie = valid_chain(2);
        lie.length = 10;
        let resolver = resolver(vec![("liar:5000", Reply::Chain(lie))]);

        let outcome = resolver.resolve(&ledger).await;
        assert!(!outcome.replaced);
        assert_eq!(outcome.chain.len(), 3);
    }

    #[actix_web::test]
    async fn no_peers_means_no_replacement() {
        let ledger = local_ledger(1, &[]);
        let outcome = resolver(vec![]).resolve(&ledger).await;
        assert!(!outcome.replaced);
        assert_eq!(outcome.chain.len(), 1);
    }
}
