//! # es-03-snapshot-aggregator
//!
//! Pure transformation from one era's raw chain data into one `ChainData`
//! snapshot. No I/O: everything it needs arrives in `RawEraData`.
//!
//! ## Pipeline
//!
//! ```text
//! nominators ─┐
//!             ├─ join by address ──→ NominatorRecord[] ─┐
//! ledgers ────┘   (first wins,                          │ invert targets
//!                  duplicates → anomaly)                ↓
//! exposures ──→ validator universe ──→ VoterMap (empty voters first)
//!                                           │
//! reward points, identities ───────────────→ ValidatorRecord[] ──→ ChainData
//! ```
//!
//! ## Guarantees
//!
//! - A validator nobody nominates gets an empty voter list, not an omission.
//! - A nomination target outside the exposure table gets a record on demand.
//! - Duplicate ledger/nomination rows keep the first value and emit one
//!   `DataAnomaly` per discarded row; values are never summed or averaged.
//! - Output is deterministic for the same input. Voter order follows the
//!   nominator table order.

pub mod aggregator;
pub mod domain;

pub use aggregator::{aggregate, Aggregation};
pub use domain::{AggregationReport, DataAnomaly, NominatorRecord, VoterMap};
