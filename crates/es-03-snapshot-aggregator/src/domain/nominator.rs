//! Nominator ⋈ ledger join

use super::anomaly::{AggregationReport, DataAnomaly};
use es_01_chain_source::{LedgerEntry, NominatorEntry};
use shared_types::{AccountId, Balance};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A nominator's declared targets joined with its bonded total
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NominatorRecord {
    pub address: AccountId,
    /// Distinct targets, in declaration order
    pub targets: Vec<AccountId>,
    pub total_stake: Balance,
}

/// Join nominations with ledgers by address
///
/// Output order follows the nominator table. Duplicate rows in either table
/// keep the first one seen and record an anomaly. A nominator without a
/// ledger is dropped because its stake cannot be known.
pub fn join_nominators(
    nominators: &[NominatorEntry],
    ledgers: &[LedgerEntry],
    report: &mut AggregationReport,
) -> Vec<NominatorRecord> {
    let mut stakes: HashMap<&AccountId, Balance> = HashMap::with_capacity(ledgers.len());
    for ledger in ledgers {
        match stakes.get(&ledger.address) {
            Some(&kept) => {
                let anomaly = DataAnomaly::DuplicateLedger {
                    address: ledger.address.clone(),
                    kept,
                    discarded: ledger.total,
                };
                warn!(anomaly = %anomaly, "[es-03] Data anomaly");
                report.anomalies.push(anomaly);
            }
            None => {
                stakes.insert(&ledger.address, ledger.total);
            }
        }
    }

    let mut seen: HashSet<&AccountId> = HashSet::with_capacity(nominators.len());
    let mut records = Vec::with_capacity(nominators.len());

    for nominator in nominators {
        if !seen.insert(&nominator.address) {
            let anomaly = DataAnomaly::DuplicateNominator {
                address: nominator.address.clone(),
            };
            warn!(anomaly = %anomaly, "[es-03] Data anomaly");
            report.anomalies.push(anomaly);
            continue;
        }

        let Some(&total_stake) = stakes.get(&nominator.address) else {
            debug!(nominator = %nominator.address, "[es-03] No ledger for nominator, dropped");
            report.dropped_nominators.push(nominator.address.clone());
            continue;
        };

        let mut distinct = HashSet::with_capacity(nominator.targets.len());
        let targets = nominator
            .targets
            .iter()
            .filter(|t| distinct.insert(*t))
            .cloned()
            .collect();

        records.push(NominatorRecord {
            address: nominator.address.clone(),
            targets,
            total_stake,
        });
    }

    records
}
