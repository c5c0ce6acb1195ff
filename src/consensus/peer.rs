use log::debug;
use reqwest::StatusCode;
use std::time::Duration;

use crate::blockchain::ChainSnapshot;
use crate::error::{LedgerError, Result};

/// Source of a peer's view of the chain.
pub trait ChainFetcher {
    fn fetch_chain(&self, address: &str) -> impl Future<Output = Result<ChainSnapshot>>;
}

/// Fetches `http://{address}/chain` from peers over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPeerClient {
    client: reqwest::Client,
}

impl HttpPeerClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl ChainFetcher for HttpPeerClient {
    async fn fetch_chain(&self, address: &str) -> Result<ChainSnapshot> {
        let url = format!("http://{address}/chain");
        debug!("PEER - GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LedgerError::UnreachablePeer {
                peer: address.to_string(),
                reason: e.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            return Err(LedgerError::MalformedPeerResponse {
                peer: address.to_string(),
                reason: format!("unexpected status {}", response.status()),
            });
        }

        response
            .json::<ChainSnapshot>()
            .await
            .map_err(|e| LedgerError::MalformedPeerResponse {
                peer: address.to_string(),
                reason: e.to_string(),
            })
    }
}
