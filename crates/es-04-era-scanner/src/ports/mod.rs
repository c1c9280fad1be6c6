//! Ports (hexagonal architecture)
//!
//! Outbound dependencies are the `ChainDataSource` of es-01 and the
//! `EraStore` of es-02; only the driving API is defined here.

pub mod inbound;

pub use inbound::{EraScanApi, ScanOutcome, ScanReport};
