//! Scan coordinator errors
//!
//! Fetch and persistence failures are carried unmodified; every one of them
//! aborts the running reconciliation loop.

use es_01_chain_source::ChainSourceError;
use es_02_era_storage::EraStoreError;
use shared_types::EraIndex;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Raw era data could not be retrieved
    #[error("fetch failed: {0}")]
    Fetch(#[from] ChainSourceError),

    /// Snapshot could not be committed
    #[error("persist failed: {0}")]
    Persist(#[from] EraStoreError),

    /// The source answered with data for a different era
    #[error("requested era {requested}, source returned era {returned}")]
    EraMismatch {
        requested: EraIndex,
        returned: EraIndex,
    },

    #[error("invalid scan config: {reason}")]
    InvalidConfig { reason: String },
}

pub type ScanResult<T> = Result<T, ScanError>;
