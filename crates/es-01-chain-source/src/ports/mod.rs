//! Ports module for the chain source subsystem

pub mod outbound;

pub use outbound::{ChainDataSource, IdentityLookup};
