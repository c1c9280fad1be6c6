//! Aggregator domain types

pub mod anomaly;
pub mod nominator;
pub mod voters;

pub use anomaly::{AggregationReport, DataAnomaly};
pub use nominator::{join_nominators, NominatorRecord};
pub use voters::VoterMap;
