//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Chain**: `EraIndex`, `BlockNumber`, `EraLastBlock`, `ChainMetadata`
//! - **Staking**: `Exposure`, `IndividualExposure`, `Voter`, `ValidatorRecord`
//! - **Snapshot**: `ChainData`, `EraGap`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// Monotonically increasing era identifier.
pub type EraIndex = u32;

/// Block height.
pub type BlockNumber = u64;

/// Token amount in the chain's smallest unit.
pub type Balance = u128;

/// Era reward points earned by a validator.
pub type RewardPoint = u32;

/// Unix timestamp in milliseconds.
pub type Timestamp = u64;

/// An SS58-encoded account address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The last block of an era, used to anchor point-in-time queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EraLastBlock {
    pub era: EraIndex,
    pub block: BlockNumber,
}

/// Static chain properties carried through to every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainMetadata {
    /// Lower-cased network name (e.g. `kusama`).
    pub network: String,
    /// Endpoint the data was read from.
    pub endpoint: String,
    pub token_symbol: String,
    pub token_decimals: u8,
}

impl Default for ChainMetadata {
    fn default() -> Self {
        Self {
            network: "development".to_string(),
            endpoint: "ws://127.0.0.1:9944".to_string(),
            token_symbol: "UNIT".to_string(),
            token_decimals: 12,
        }
    }
}

// =============================================================================
// CLUSTER B: STAKING
// =============================================================================

/// A single nominator's share of a validator's exposure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualExposure {
    pub who: AccountId,
    pub value: Balance,
}

/// Total stake backing a validator in an era and its decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Exposure {
    pub total: Balance,
    pub own: Balance,
    pub others: Vec<IndividualExposure>,
}

/// A nominator as seen from one validator, with the stake it bonds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub address: AccountId,
    pub stake: Balance,
}

/// Denormalized per-validator record for one era.
///
/// `voters` is empty, never absent, for a validator nobody nominated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorRecord {
    pub address: AccountId,
    pub display_name: String,
    pub era_points: RewardPoint,
    pub exposure: Exposure,
    pub voters: Vec<Voter>,
}

// =============================================================================
// CLUSTER C: SNAPSHOT
// =============================================================================

/// The unit of work and the unit of persistence: one era's staking snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainData {
    pub metadata: ChainMetadata,
    pub era_index: EraIndex,
    pub timestamp: Timestamp,
    pub block_number: BlockNumber,
    pub total_era_points: RewardPoint,
    pub total_issuance: Balance,
    pub validators: Vec<ValidatorRecord>,
}

impl ChainData {
    pub fn validator(&self, address: &AccountId) -> Option<&ValidatorRecord> {
        self.validators.iter().find(|v| &v.address == address)
    }

    pub fn voter_count(&self) -> usize {
        self.validators.iter().map(|v| v.voters.len()).sum()
    }
}

/// An inclusive range of eras that was skipped and will never be backfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EraGap {
    pub from: EraIndex,
    pub to: EraIndex,
}

impl EraGap {
    pub fn len(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.to - self.from + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }

    pub fn contains(&self, era: EraIndex) -> bool {
        self.from <= era && era <= self.to
    }
}

impl fmt::Display for EraGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}
