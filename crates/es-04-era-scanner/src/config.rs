//! Scan coordinator configuration

use crate::error::{ScanError, ScanResult};
use serde::{Deserialize, Serialize};

/// Oldest era the chain still serves, counted back from the active era.
pub const MAX_LAG: u32 = 84;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraScanConfig {
    /// Eras further back than this from the active era are recorded as a gap
    pub max_lag: u32,
}

impl Default for EraScanConfig {
    fn default() -> Self {
        Self { max_lag: MAX_LAG }
    }
}

impl EraScanConfig {
    pub fn validate(&self) -> ScanResult<()> {
        if self.max_lag == 0 {
            return Err(ScanError::InvalidConfig {
                reason: "max_lag must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
