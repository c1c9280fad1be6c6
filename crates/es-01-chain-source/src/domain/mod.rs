//! Domain types for raw chain data

pub mod identity;
pub mod raw;

pub use identity::IdentityInfo;
pub use raw::{EraRewardPoints, LedgerEntry, NominatorEntry, RawEraData, ValidatorExposure};
