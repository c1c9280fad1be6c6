//! # Aggregate → Store → Read Back
//!
//! The snapshot the aggregator builds is the snapshot the store returns.

#[cfg(test)]
mod tests {
    use crate::fixtures::{busy_era, era_ten, kusama};
    use es_02_era_storage::{EraStore, InMemoryEraStore};
    use es_03_snapshot_aggregator::{aggregate, DataAnomaly};
    use shared_types::{AccountId, Voter};

    #[tokio::test]
    async fn test_era_ten_persisted_and_reported() {
        let raw = era_ten();
        let out = aggregate(10, &raw, &kusama(), &raw.identities);

        let a = out.chain_data.validator(&AccountId::from("A")).unwrap();
        assert_eq!(a.exposure.total, 100);
        assert_eq!(a.display_name, "Alpha");
        assert_eq!(
            a.voters,
            vec![Voter {
                address: AccountId::from("N"),
                stake: 30
            }]
        );
        let b = out.chain_data.validator(&AccountId::from("B")).unwrap();
        assert_eq!(b.exposure.total, 50);
        assert!(b.voters.is_empty());

        let store = InMemoryEraStore::in_memory();
        store.insert(out.chain_data.clone()).await.unwrap();

        assert_eq!(store.last_processed_era().await.unwrap(), 10);
        assert_eq!(
            store.load_snapshot(10).await.unwrap(),
            Some(out.chain_data)
        );
    }

    #[tokio::test]
    async fn test_busy_era_keeps_on_demand_validator_through_storage() {
        let raw = busy_era(7);
        let out = aggregate(7, &raw, &kusama(), &raw.identities);

        assert_eq!(out.report.dropped_nominators, vec![AccountId::from("ghost")]);
        assert_eq!(out.report.on_demand_validators, vec![AccountId::from("Z")]);
        assert!(out.report.anomalies.is_empty());

        let store = InMemoryEraStore::in_memory();
        store.insert(out.chain_data).await.unwrap();
        let loaded = store.load_snapshot(7).await.unwrap().unwrap();

        let addresses: Vec<_> = loaded
            .validators
            .iter()
            .map(|v| v.address.as_str().to_string())
            .collect();
        assert_eq!(addresses, vec!["A", "B", "Z"]);
        assert_eq!(loaded.validator(&AccountId::from("A")).unwrap().voters.len(), 2);
        assert_eq!(loaded.validator(&AccountId::from("B")).unwrap().display_name, "Org/b-2");
        assert_eq!(loaded.voter_count(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_rows_reported_not_fatal() {
        let raw = era_ten()
            .with_ledger("N", 999)
            .with_nominator("N", &["B"]);
        let out = aggregate(10, &raw, &kusama(), &raw.identities);

        assert_eq!(out.report.anomalies.len(), 2);
        assert!(out
            .report
            .anomalies
            .iter()
            .any(|a| matches!(a, DataAnomaly::DuplicateLedger { kept: 30, .. })));
        assert!(out
            .report
            .anomalies
            .iter()
            .any(|a| matches!(a, DataAnomaly::DuplicateNominator { .. })));

        // first nominations row wins: N still backs A only
        let b = out.chain_data.validator(&AccountId::from("B")).unwrap();
        assert!(b.voters.is_empty());
    }
}
