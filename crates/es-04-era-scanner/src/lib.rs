//! # es-04-era-scanner
//!
//! Keeps the era store in step with the chain: every completed era is
//! aggregated and committed exactly once, in ascending order.
//!
//! ## Architecture
//!
//! ```text
//! NewEra ──→ on_era_changed ──→ request_scan ──┬── in flight? ──→ flag rescan, return
//!                                              │
//!                                              └── run loop:
//!                                                   last = store.last_processed_era()
//!                                                   plan [last+1, active-1] (lag-clamped)
//!                                                   for era: fetch → aggregate → insert
//!                                                   rescan flagged? ──→ next pass
//! ```
//!
//! ## Failure Contract
//!
//! Any fetch or persist error aborts the whole loop, logs the last committed
//! era and is returned to the caller, which is expected to terminate the
//! process. A restart resumes from the store.

pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use config::{EraScanConfig, MAX_LAG};
pub use domain::{Backlog, ScanPhase, ScanState};
pub use error::{ScanError, ScanResult};
pub use ports::{EraScanApi, ScanOutcome, ScanReport};
pub use service::EraScanner;
