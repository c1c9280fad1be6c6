//! Error types for the chain source subsystem

use shared_types::EraIndex;
use thiserror::Error;

/// Chain source errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainSourceError {
    /// State for the era has been pruned by the node
    #[error("Era {era} is too old: historical state no longer available")]
    EraTooOld { era: EraIndex },

    /// Transport failure while talking to the node
    #[error("Network failure: {reason}")]
    NetworkFailure { reason: String },

    /// The node is not reachable or not serving requests
    #[error("Node unavailable: {reason}")]
    NodeUnavailable { reason: String },

    /// Data was retrieved but could not be decoded
    #[error("Malformed data for era {era}: {reason}")]
    MalformedData { era: EraIndex, reason: String },

    /// Identity lookup failed for a single account
    #[error("Identity lookup failed for {who}: {reason}")]
    IdentityLookupFailed { who: String, reason: String },
}

/// Result type for chain source operations
pub type ChainSourceResult<T> = Result<T, ChainSourceError>;
