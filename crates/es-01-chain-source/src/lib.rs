//! # es-01-chain-source
//!
//! Supplies the raw staking data the era scanner aggregates, and announces
//! era transitions on the shared bus.
//!
//! ## Architecture
//!
//! ```text
//! Chain node / fixtures ──fetch_era_snapshot──→ RawEraData ──→ Aggregator (3)
//!          │
//!          └──current_active_era (polled)──→ EraWatcher ──NewEra──→ Event Bus ──→ Scanner (4)
//! ```
//!
//! ## Adapters
//!
//! | Adapter | Use |
//! |---------|-----|
//! | `InMemoryChain` | Tests and simulations, supports failure injection |
//! | `FixtureChainSource` | JSON era dumps on disk (`chain.json`, `eras/<era>.json`) |
//!
//! ## Error Contract
//!
//! `fetch_era_snapshot` fails with `EraTooOld`, `NetworkFailure` or
//! `NodeUnavailable`. None of these are retried here; the scanner treats
//! them as fatal for the current reconciliation loop.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod watcher;

pub use adapters::{FixtureChainSource, InMemoryChain};
pub use domain::{
    EraRewardPoints, IdentityInfo, LedgerEntry, NominatorEntry, RawEraData, ValidatorExposure,
};
pub use error::{ChainSourceError, ChainSourceResult};
pub use ports::{ChainDataSource, IdentityLookup};
pub use watcher::EraWatcher;
