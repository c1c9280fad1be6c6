//! # es-02-era-storage
//!
//! Durable, append-only persistence of per-era staking snapshots.
//!
//! ## Responsibilities
//!
//! - Commit one `ChainData` per era as a single atomic batch
//! - Report the highest committed era (`0` when empty)
//! - Rebuild a stored snapshot from its rows
//! - Record unrecoverable history gaps so operators can see them
//!
//! ## Row Layout
//!
//! | Key | Value |
//! |-----|-------|
//! | `era:<era>` | era metadata |
//! | `val:<era>:<validator>` | validator row |
//! | `vot:<era>:<validator>:<n>` | voter row |
//! | `meta:last_era` | highest committed era |
//! | `gap:<from>` | skipped range |
//!
//! Era numbers are big-endian so prefix scans come back in era order.
//!
//! ## Invariants
//!
//! - Either every row of an era is visible or none is.
//! - Eras are committed in strictly ascending order; `insert` rejects
//!   anything not above `meta:last_era`.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use error::{EraStoreError, EraStoreResult, KVStoreError};
pub use ports::{Batch, EraStore, KeyValueStore, KvEntry};
pub use service::{InMemoryEraStore, KvEraStore};
