//! Stored row shapes and their bincode codec
//!
//! A snapshot is split into one era row, one row per validator and one row
//! per voter. `rebuild` reverses the split.

use crate::error::{EraStoreError, EraStoreResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared_types::{
    AccountId, Balance, BlockNumber, ChainData, ChainMetadata, EraIndex, Exposure, RewardPoint,
    Timestamp, ValidatorRecord, Voter,
};
use std::collections::HashMap;

/// Era-level metadata row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraRow {
    pub metadata: ChainMetadata,
    pub era_index: EraIndex,
    pub timestamp: Timestamp,
    pub block_number: BlockNumber,
    pub total_era_points: RewardPoint,
    pub total_issuance: Balance,
    pub validator_count: u32,
}

/// One validator of one era.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorRow {
    /// Position in the snapshot's validator list
    pub position: u32,
    pub address: AccountId,
    pub display_name: String,
    pub era_points: RewardPoint,
    pub exposure: Exposure,
}

/// One voter backing one validator in one era.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRow {
    pub validator: AccountId,
    pub address: AccountId,
    pub stake: Balance,
}

pub fn encode<T: Serialize>(row: &T) -> EraStoreResult<Vec<u8>> {
    Ok(bincode::serialize(row)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> EraStoreResult<T> {
    Ok(bincode::deserialize(bytes)?)
}

impl EraRow {
    pub fn from_snapshot(data: &ChainData) -> Self {
        Self {
            metadata: data.metadata.clone(),
            era_index: data.era_index,
            timestamp: data.timestamp,
            block_number: data.block_number,
            total_era_points: data.total_era_points,
            total_issuance: data.total_issuance,
            validator_count: data.validators.len() as u32,
        }
    }

    /// Reassemble the snapshot from its validator and voter rows.
    ///
    /// Validators come back in their original order. Voters keep the order
    /// they were written in; voter rows for unknown validators are corruption.
    pub fn rebuild(
        self,
        mut validators: Vec<ValidatorRow>,
        voters: Vec<VoterRow>,
    ) -> EraStoreResult<ChainData> {
        if validators.len() != self.validator_count as usize {
            return Err(EraStoreError::Corrupted {
                key: format!("era:{}", self.era_index),
                reason: format!(
                    "expected {} validator rows, found {}",
                    self.validator_count,
                    validators.len()
                ),
            });
        }
        validators.sort_by_key(|row| row.position);

        let mut records: Vec<ValidatorRecord> = validators
            .into_iter()
            .map(|row| ValidatorRecord {
                address: row.address,
                display_name: row.display_name,
                era_points: row.era_points,
                exposure: row.exposure,
                voters: Vec::new(),
            })
            .collect();

        let index: HashMap<AccountId, usize> = records
            .iter()
            .enumerate()
            .map(|(i, record)| (record.address.clone(), i))
            .collect();

        for voter in voters {
            let i = *index
                .get(&voter.validator)
                .ok_or_else(|| EraStoreError::Corrupted {
                    key: format!("vot:{}:{}", self.era_index, voter.validator),
                    reason: "voter row without validator row".to_string(),
                })?;
            records[i].voters.push(Voter {
                address: voter.address,
                stake: voter.stake,
            });
        }

        Ok(ChainData {
            metadata: self.metadata,
            era_index: self.era_index,
            timestamp: self.timestamp,
            block_number: self.block_number,
            total_era_points: self.total_era_points,
            total_issuance: self.total_issuance,
            validators: records,
        })
    }
}
