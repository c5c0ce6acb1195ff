use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("chain is empty: genesis block missing")]
    EmptyChain,

    #[error("malformed response from peer {peer}: {reason}")]
    MalformedPeerResponse { peer: String, reason: String },

    #[error("invalid chain at block {index}: {reason}")]
    InvalidChain { index: u64, reason: &'static str },

    #[error("peer {peer} unreachable: {reason}")]
    UnreachablePeer { peer: String, reason: String },

    #[error("node address must not be empty")]
    EmptyNodeAddress,

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
