//! Raw per-era staking data as returned by the chain
//!
//! Tables are kept in the order the node returned them. Duplicates are
//! representable on purpose: resolving them is the aggregator's job.

use super::identity::IdentityInfo;
use serde::{Deserialize, Serialize};
use shared_types::{
    AccountId, Balance, BlockNumber, EraIndex, EraLastBlock, Exposure, RewardPoint, Timestamp,
};
use std::collections::BTreeMap;

/// Reward points earned during an era
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraRewardPoints {
    pub total: RewardPoint,
    #[serde(default)]
    pub individual: BTreeMap<AccountId, RewardPoint>,
}

impl EraRewardPoints {
    /// Points earned by `who`, 0 if absent
    pub fn points_of(&self, who: &AccountId) -> RewardPoint {
        self.individual.get(who).copied().unwrap_or(0)
    }
}

/// One row of the era exposure table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorExposure {
    pub validator: AccountId,
    pub exposure: Exposure,
}

/// One row of the nominators table: who a nominator backs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominatorEntry {
    pub address: AccountId,
    pub targets: Vec<AccountId>,
}

/// One row of the staking ledger table: total bonded by a stash
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub address: AccountId,
    pub total: Balance,
}

/// Everything the chain reports for one era, read at the era's last block
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEraData {
    pub era: EraIndex,
    pub last_block: BlockNumber,
    pub timestamp: Timestamp,
    pub total_issuance: Balance,
    #[serde(default)]
    pub reward_points: EraRewardPoints,
    #[serde(default)]
    pub exposures: Vec<ValidatorExposure>,
    #[serde(default)]
    pub nominators: Vec<NominatorEntry>,
    #[serde(default)]
    pub ledgers: Vec<LedgerEntry>,
    #[serde(default)]
    pub identities: BTreeMap<AccountId, IdentityInfo>,
}

impl RawEraData {
    /// Era with no validators, nominators or points
    pub fn empty(era: EraIndex, last_block: BlockNumber, timestamp: Timestamp) -> Self {
        Self {
            era,
            last_block,
            timestamp,
            total_issuance: 0,
            reward_points: EraRewardPoints::default(),
            exposures: Vec::new(),
            nominators: Vec::new(),
            ledgers: Vec::new(),
            identities: BTreeMap::new(),
        }
    }

    pub fn era_last_block(&self) -> EraLastBlock {
        EraLastBlock {
            era: self.era,
            block: self.last_block,
        }
    }

    pub fn with_issuance(mut self, total_issuance: Balance) -> Self {
        self.total_issuance = total_issuance;
        self
    }

    /// Add an exposure row with `total` stake of which `own` is self-bonded
    pub fn with_validator(mut self, validator: &str, total: Balance, own: Balance) -> Self {
        self.exposures.push(ValidatorExposure {
            validator: AccountId::from(validator),
            exposure: Exposure {
                total,
                own,
                others: Vec::new(),
            },
        });
        self
    }

    pub fn with_points(mut self, validator: &str, points: RewardPoint) -> Self {
        self.reward_points
            .individual
            .insert(AccountId::from(validator), points);
        self.reward_points.total = self.reward_points.total.saturating_add(points);
        self
    }

    pub fn with_nominator(mut self, address: &str, targets: &[&str]) -> Self {
        self.nominators.push(NominatorEntry {
            address: AccountId::from(address),
            targets: targets.iter().map(|t| AccountId::from(*t)).collect(),
        });
        self
    }

    pub fn with_ledger(mut self, address: &str, total: Balance) -> Self {
        self.ledgers.push(LedgerEntry {
            address: AccountId::from(address),
            total,
        });
        self
    }

    pub fn with_identity(mut self, address: &str, info: IdentityInfo) -> Self {
        self.identities.insert(AccountId::from(address), info);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_default_to_zero() {
        let raw = RawEraData::empty(4, 100, 0).with_points("a", 20);
        assert_eq!(raw.reward_points.points_of(&AccountId::from("a")), 20);
        assert_eq!(raw.reward_points.points_of(&AccountId::from("b")), 0);
        assert_eq!(raw.reward_points.total, 20);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{"era":9,"last_block":5400,"timestamp":1700000000000,"total_issuance":1000}"#;
        let raw: RawEraData = serde_json::from_str(json).unwrap();
        assert_eq!(raw.era_last_block(), EraLastBlock { era: 9, block: 5400 });
        assert!(raw.exposures.is_empty());
        assert!(raw.identities.is_empty());
    }

    #[test]
    fn test_duplicate_rows_are_kept() {
        let raw = RawEraData::empty(1, 1, 1)
            .with_ledger("n", 10)
            .with_ledger("n", 20);
        assert_eq!(raw.ledgers.len(), 2);
    }
}
