use std::env;
use std::time::Duration;
use uuid::Uuid;

/// Node settings, read from the environment (a `.env` file is loaded first by `main`).
///
/// - `HOST` / `PORT`: bind address (default `127.0.0.1:5000`)
/// - `NODE_ID`: recipient of mining rewards (default: random uuid)
/// - `PEER_TIMEOUT_SECS`: per-peer request timeout during resolution (default 5)
/// - `PEERS`: comma-separated peers to register at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub node_id: String,
    pub peer_timeout: Duration,
    pub peers: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);
        let node_id = env::var("NODE_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.node_id);
        let peer_timeout = env::var("PEER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.peer_timeout);
        let peers = env::var("PEERS")
            .map(|v| parse_peers(&v))
            .unwrap_or_default();

        Self {
            host,
            port,
            node_id,
            peer_timeout,
            peers,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            node_id: Uuid::new_v4().simple().to_string(),
            peer_timeout: Duration::from_secs(5),
            peers: Vec::new(),
        }
    }
}

fn parse_peers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
