//! # JSON Fixtures → Coordinator → Store
//!
//! The binary's data path, without the binary.

#[cfg(test)]
mod tests {
    use crate::fixtures::{busy_era, era_ten, kusama, write_chain_file, write_era_file};
    use es_01_chain_source::adapters::fixture::ERAS_DIR;
    use es_01_chain_source::{ChainSourceError, FixtureChainSource};
    use es_02_era_storage::{EraStore, InMemoryEraStore};
    use es_03_snapshot_aggregator::aggregate;
    use es_04_era_scanner::{EraScanApi, EraScanConfig, EraScanner, ScanError, ScanOutcome};
    use shared_types::EraGap;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fixture_backlog_with_lag_gap() {
        let dir = TempDir::new().unwrap();
        write_chain_file(dir.path(), kusama(), 11);
        write_era_file(dir.path(), &busy_era(8));
        write_era_file(dir.path(), &busy_era(9));
        write_era_file(dir.path(), &era_ten());

        let source = Arc::new(FixtureChainSource::open(dir.path()).await.unwrap());
        let store = Arc::new(InMemoryEraStore::in_memory());
        let scanner = EraScanner::bootstrap(source, store.clone(), EraScanConfig { max_lag: 3 })
            .await
            .unwrap();

        let ScanOutcome::Completed(report) = scanner.request_scan().await.unwrap() else {
            panic!("expected a completed scan");
        };
        assert_eq!(report.eras_written, vec![8, 9, 10]);
        assert_eq!(report.gaps, vec![EraGap { from: 1, to: 7 }]);
        assert_eq!(store.gaps().await.unwrap(), vec![EraGap { from: 1, to: 7 }]);

        let raw = era_ten();
        let expected = aggregate(10, &raw, &kusama(), &raw.identities).chain_data;
        assert_eq!(store.load_snapshot(10).await.unwrap(), Some(expected));
    }

    #[tokio::test]
    async fn test_malformed_era_file_aborts() {
        let dir = TempDir::new().unwrap();
        write_chain_file(dir.path(), kusama(), 3);
        write_era_file(dir.path(), &busy_era(1));
        std::fs::write(dir.path().join(ERAS_DIR).join("2.json"), "{ not json").unwrap();

        let source = Arc::new(FixtureChainSource::open(dir.path()).await.unwrap());
        let store = Arc::new(InMemoryEraStore::in_memory());
        let scanner =
            EraScanner::bootstrap(source, store.clone(), EraScanConfig::default())
                .await
                .unwrap();

        let err = scanner.request_scan().await.unwrap_err();
        assert!(matches!(
            err,
            ScanError::Fetch(ChainSourceError::MalformedData { era: 2, .. })
        ));
        assert_eq!(store.stored_eras().await.unwrap(), vec![1]);
    }
}
