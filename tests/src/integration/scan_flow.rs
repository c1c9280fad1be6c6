//! # Watcher → Bus → Coordinator
//!
//! Era transitions observed by the watcher reach the coordinator through the
//! shared bus, and however many of them arrive at once, eras are committed
//! once each and in order.

#[cfg(test)]
mod tests {
    use crate::fixtures::kusama;
    use es_01_chain_source::{ChainSourceError, EraWatcher, InMemoryChain};
    use es_02_era_storage::{EraStore, InMemoryEraStore};
    use es_04_era_scanner::{EraScanApi, EraScanConfig, EraScanner, ScanError, ScanOutcome};
    use shared_bus::{ChainEvent, EventFilter, EventSubscriber, EventTopic, InMemoryEventBus};
    use std::sync::Arc;
    use std::time::Duration;

    fn chain(active_era: u32) -> Arc<InMemoryChain> {
        Arc::new(InMemoryChain::new(kusama(), active_era).with_generated_eras())
    }

    #[tokio::test]
    async fn test_new_era_event_triggers_scan() {
        let source = chain(3);
        let store = Arc::new(InMemoryEraStore::in_memory());
        let bus = Arc::new(InMemoryEventBus::new());
        let scanner = EraScanner::bootstrap(source.clone(), store.clone(), EraScanConfig::default())
            .await
            .unwrap()
            .with_publisher(bus.clone());

        scanner.request_scan().await.unwrap();
        assert_eq!(store.last_processed_era().await.unwrap(), 2);

        let mut eras = bus.subscribe(EventFilter::topics(vec![EventTopic::Era]));
        let mut watcher = EraWatcher::new(source.clone(), bus.clone(), Duration::from_secs(6))
            .starting_at(scanner.active_era());

        source.set_active_era(5);
        assert_eq!(watcher.poll_once().await.unwrap(), Some(5));

        let Some(ChainEvent::NewEra { era }) = eras.recv().await else {
            panic!("expected NewEra");
        };
        let outcome = scanner.on_era_changed(era).await.unwrap();

        match outcome {
            Some(ScanOutcome::Completed(report)) => assert_eq!(report.eras_written, vec![3, 4]),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(store.stored_eras().await.unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_notification_storm_commits_each_era_once() {
        let source = chain(1);
        let store = Arc::new(InMemoryEraStore::in_memory());
        let scanner = Arc::new(
            EraScanner::new(source.clone(), store.clone(), EraScanConfig::default(), 1).unwrap(),
        );

        let mut tasks = Vec::new();
        for era in 2..=40u32 {
            // duplicate and out-of-order notifications mixed in
            for notified in [era, era - 1, era] {
                let scanner = Arc::clone(&scanner);
                tasks.push(tokio::spawn(async move {
                    scanner.on_era_changed(notified).await
                }));
            }
            let scanner = Arc::clone(&scanner);
            tasks.push(tokio::spawn(async move {
                scanner.request_scan().await.map(Some)
            }));
        }

        for task in tasks {
            // a second concurrent loop would hit NotAscending here
            task.await.unwrap().unwrap();
        }
        scanner.request_scan().await.unwrap();

        assert_eq!(
            store.stored_eras().await.unwrap(),
            (1..=39).collect::<Vec<_>>()
        );
        // each era fetched exactly once
        let mut fetched = source.fetched();
        fetched.sort_unstable();
        fetched.dedup();
        assert_eq!(fetched.len(), source.fetched().len());
    }

    #[tokio::test]
    async fn test_restart_resumes_after_fatal_error() {
        let source = chain(10);
        source.fail_era(
            6,
            ChainSourceError::NodeUnavailable {
                reason: "node restarting".into(),
            },
        );
        let store = Arc::new(InMemoryEraStore::in_memory());

        let first =
            EraScanner::new(source.clone(), store.clone(), EraScanConfig::default(), 10).unwrap();
        let err = first.request_scan().await.unwrap_err();
        assert!(matches!(
            err,
            ScanError::Fetch(ChainSourceError::NodeUnavailable { .. })
        ));
        assert_eq!(store.last_processed_era().await.unwrap(), 5);

        source.clear_failure(6);
        let second = EraScanner::bootstrap(source.clone(), store.clone(), EraScanConfig::default())
            .await
            .unwrap();
        second.request_scan().await.unwrap();

        assert_eq!(store.stored_eras().await.unwrap(), (1..=9).collect::<Vec<_>>());
    }

    #[cfg(feature = "rocksdb")]
    #[tokio::test]
    async fn test_durable_store_survives_restart() {
        use es_02_era_storage::{KvEraStore, RocksDbConfig, RocksDbStore};

        let dir = tempfile::TempDir::new().unwrap();
        let open = || {
            let config = RocksDbConfig::for_testing(dir.path().to_string_lossy().to_string());
            Arc::new(KvEraStore::new(RocksDbStore::open(config).unwrap()))
        };

        let source = chain(6);
        {
            let store = open();
            let scanner =
                EraScanner::new(source.clone(), store, EraScanConfig::default(), 6).unwrap();
            scanner.request_scan().await.unwrap();
        }

        let store = open();
        assert_eq!(store.last_processed_era().await.unwrap(), 5);

        source.set_active_era(8);
        let scanner = EraScanner::bootstrap(source.clone(), store.clone(), EraScanConfig::default())
            .await
            .unwrap();
        scanner.request_scan().await.unwrap();

        assert_eq!(store.stored_eras().await.unwrap(), (1..=7).collect::<Vec<_>>());
        assert_eq!(source.fetched(), (1..=7).collect::<Vec<_>>());
    }
}
