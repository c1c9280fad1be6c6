//! Ports (hexagonal architecture)

pub mod inbound;
pub mod outbound;

pub use inbound::EraStore;
pub use outbound::{Batch, KeyValueStore, KvEntry};
