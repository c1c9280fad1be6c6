//! Era storage errors

use shared_types::EraIndex;
use thiserror::Error;

/// Errors raised by a key-value backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KVStoreError {
    #[error("Cannot open store at {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("Read failed: {reason}")]
    Read { reason: String },

    /// Nothing from the batch was applied.
    #[error("Batch write failed: {reason}")]
    Write { reason: String },
}

/// Errors raised by the era store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EraStoreError {
    /// Insert would break the strictly ascending commit order.
    #[error("Era {era} is not above the last committed era {last}")]
    NotAscending { era: EraIndex, last: EraIndex },

    /// The backend failed; nothing from the batch was applied.
    #[error("Storage backend failure: {0}")]
    Storage(#[from] KVStoreError),

    /// A row could not be encoded or decoded.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A stored row does not match its key.
    #[error("Corrupted row at {key}: {reason}")]
    Corrupted { key: String, reason: String },
}

pub type EraStoreResult<T> = Result<T, EraStoreError>;

impl From<bincode::Error> for EraStoreError {
    fn from(err: bincode::Error) -> Self {
        EraStoreError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kv_error_wraps_into_store_error() {
        let kv_err = KVStoreError::Write {
            reason: "disk failure".to_string(),
        };
        let err: EraStoreError = kv_err.into();

        match err {
            EraStoreError::Storage(KVStoreError::Write { reason }) => {
                assert!(reason.contains("disk failure"));
            }
            _ => panic!("Expected Storage error"),
        }
    }

    #[test]
    fn test_not_ascending_message() {
        let err = EraStoreError::NotAscending { era: 9, last: 10 };
        assert_eq!(
            err.to_string(),
            "Era 9 is not above the last committed era 10"
        );
    }
}
