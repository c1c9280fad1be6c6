//! Non-fatal data anomalies found while aggregating
//!
//! None of these abort a scan. They are logged as warnings and returned so
//! callers can surface them.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Balance};
use std::fmt;

/// A duplicate row in one of the raw tables
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataAnomaly {
    /// Second ledger row for the same stash; `kept` is the first-seen total
    DuplicateLedger {
        address: AccountId,
        kept: Balance,
        discarded: Balance,
    },
    /// Second nominations row for the same nominator
    DuplicateNominator { address: AccountId },
    /// Second exposure row for the same validator
    DuplicateExposure { validator: AccountId },
}

impl fmt::Display for DataAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataAnomaly::DuplicateLedger {
                address,
                kept,
                discarded,
            } => write!(
                f,
                "multiple ledgers for {}: kept {}, discarded {}",
                address, kept, discarded
            ),
            DataAnomaly::DuplicateNominator { address } => {
                write!(f, "multiple nominations for {}: kept first", address)
            }
            DataAnomaly::DuplicateExposure { validator } => {
                write!(f, "multiple exposures for {}: kept first", validator)
            }
        }
    }
}

/// What the aggregator noticed besides the snapshot itself
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregationReport {
    pub anomalies: Vec<DataAnomaly>,
    /// Nominators with no ledger row (stake unknown), dropped from the join
    pub dropped_nominators: Vec<AccountId>,
    /// Nomination targets missing from the exposure table, added on demand
    pub on_demand_validators: Vec<AccountId>,
}

impl AggregationReport {
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}
