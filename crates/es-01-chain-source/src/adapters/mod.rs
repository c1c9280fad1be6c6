//! Adapters implementing the chain source ports

pub mod fixture;
pub mod memory;

pub use fixture::FixtureChainSource;
pub use memory::InMemoryChain;
