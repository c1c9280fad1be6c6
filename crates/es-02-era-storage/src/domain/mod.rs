//! Era storage domain: key layout and row encoding

pub mod keys;
pub mod rows;

pub use keys::KeyPrefix;
pub use rows::{EraRow, ValidatorRow, VoterRow};
