pub mod peer;
pub mod registry;
pub mod resolver;

pub use peer::{ChainFetcher, HttpPeerClient};
pub use registry::NodeRegistry;
pub use resolver::{Resolution, Resolver};
