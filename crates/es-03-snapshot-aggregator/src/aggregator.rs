//! Snapshot assembly
//!
//! Reference: original per-era gatherer, rebuilt as a pure function.

use crate::domain::{join_nominators, AggregationReport, DataAnomaly, VoterMap};
use es_01_chain_source::{IdentityLookup, RawEraData};
use shared_types::{
    AccountId, ChainData, ChainMetadata, EraIndex, Exposure, ValidatorRecord, Voter,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Result of aggregating one era
#[derive(Clone, Debug)]
pub struct Aggregation {
    pub chain_data: ChainData,
    pub report: AggregationReport,
}

/// Build the `ChainData` snapshot for `era`
///
/// `identities` resolves display names; a missing identity or a failed
/// lookup yields an empty name and is never an error.
pub fn aggregate(
    era: EraIndex,
    raw: &RawEraData,
    metadata: &ChainMetadata,
    identities: &dyn IdentityLookup,
) -> Aggregation {
    let mut report = AggregationReport::default();

    // 1. nominators ⋈ ledgers
    let nominators = join_nominators(&raw.nominators, &raw.ledgers, &mut report);

    // 2. validator universe from the exposure table
    let mut exposures: HashMap<&AccountId, &Exposure> = HashMap::with_capacity(raw.exposures.len());
    for row in &raw.exposures {
        if exposures.contains_key(&row.validator) {
            let anomaly = DataAnomaly::DuplicateExposure {
                validator: row.validator.clone(),
            };
            warn!(era, anomaly = %anomaly, "[es-03] Data anomaly");
            report.anomalies.push(anomaly);
            continue;
        }
        exposures.insert(&row.validator, &row.exposure);
    }

    // 3. empty voter list for every validator
    let mut voter_map = VoterMap::with_validators(raw.exposures.iter().map(|row| &row.validator));

    // 4. invert nomination targets
    for nominator in &nominators {
        for target in &nominator.targets {
            let voter = Voter {
                address: nominator.address.clone(),
                stake: nominator.total_stake,
            };
            if voter_map.add_vote(target, voter) {
                debug!(era, validator = %target, "[es-03] Nomination target outside exposure set");
                report.on_demand_validators.push(target.clone());
            }
        }
    }

    // 5. per-validator records
    let validators: Vec<ValidatorRecord> = voter_map
        .into_ordered()
        .into_iter()
        .map(|(address, voters)| {
            let exposure = exposures
                .get(&address)
                .map(|e| (*e).clone())
                .unwrap_or_default();
            ValidatorRecord {
                display_name: display_name(identities, &address),
                era_points: raw.reward_points.points_of(&address),
                exposure,
                voters,
                address,
            }
        })
        .collect();

    debug!(
        era,
        validators = validators.len(),
        nominators = nominators.len(),
        dropped = report.dropped_nominators.len(),
        anomalies = report.anomalies.len(),
        "[es-03] Era aggregated"
    );

    // 6. pass-through fields
    let chain_data = ChainData {
        metadata: metadata.clone(),
        era_index: era,
        timestamp: raw.timestamp,
        block_number: raw.last_block,
        total_era_points: raw.reward_points.total,
        total_issuance: raw.total_issuance,
        validators,
    };

    Aggregation { chain_data, report }
}

fn display_name(identities: &dyn IdentityLookup, address: &AccountId) -> String {
    match identities.identity_of(address) {
        Ok(Some(info)) => info.display_name(),
        Ok(None) => String::new(),
        Err(e) => {
            debug!(validator = %address, error = %e, "[es-03] Identity lookup failed");
            String::new()
        }
    }
}
