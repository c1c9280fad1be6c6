//! # Scanner Runtime
//!
//! Wires the chain source, event bus, era watcher and scan coordinator.
//!
//! ```text
//! EraWatcher(1) ──NewEra──→ Event Bus ──→ runtime loop ──spawn──→ on_era_changed(4)
//!                                                                     │
//!                                          fatal channel ←──ScanError─┘
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Open the fixture chain source and check its network
//! 2. Seed the coordinator with the chain's active era
//! 3. Drain the backlog once
//! 4. Start the era watcher and forward its events
//!
//! A scan error is fatal: `run` returns it so the process can exit non-zero
//! and be restarted by its supervisor.

use crate::config::ScannerConfig;
use anyhow::{anyhow, bail, Context, Result};
use es_01_chain_source::{ChainDataSource, EraWatcher, FixtureChainSource};
use es_02_era_storage::EraStore;
use es_04_era_scanner::{EraScanApi, EraScanner, ScanError, ScanOutcome, ScanReport};
use shared_bus::{ChainEvent, EventFilter, EventSubscriber, EventTopic, InMemoryEventBus};
use shared_types::EraIndex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

type Scanner<S> = EraScanner<FixtureChainSource, S>;

/// The scanner process: one coordinator over one store.
pub struct ScannerRuntime<S: EraStore + 'static> {
    config: ScannerConfig,
    store: Arc<S>,
    bus: Arc<InMemoryEventBus>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl<S: EraStore + 'static> ScannerRuntime<S> {
    pub fn new(config: ScannerConfig, store: Arc<S>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            config,
            store,
            bus: Arc::new(InMemoryEventBus::new()),
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    pub fn store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    /// Ask `run` and the era watcher to stop.
    pub fn shutdown(&self) {
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
    }

    async fn open_source(&self) -> Result<Arc<FixtureChainSource>> {
        let dir = &self.config.chain.fixtures_dir;
        let source = FixtureChainSource::open(dir)
            .await
            .with_context(|| format!("Failed to open chain fixtures at {}", dir.display()))?;

        if let Some(expected) = &self.config.chain.network {
            let actual = source.metadata().network;
            if &actual != expected {
                bail!(
                    "chain source serves network {:?}, configured for {:?}",
                    actual,
                    expected
                );
            }
        }
        Ok(Arc::new(source))
    }

    async fn build_scanner(&self, source: Arc<FixtureChainSource>) -> Result<Arc<Scanner<S>>> {
        let scanner = EraScanner::bootstrap(source, self.store(), self.config.scan.clone())
            .await
            .context("Failed to initialise era scanner")?
            .with_publisher(self.bus());
        Ok(Arc::new(scanner))
    }

    /// Drain the backlog once and report what was done.
    pub async fn run_once(&self) -> Result<ScanReport> {
        let source = self.open_source().await?;
        let scanner = self.build_scanner(source).await?;

        match scanner.request_scan().await.context("Era scan failed")? {
            ScanOutcome::Completed(report) => Ok(report),
            ScanOutcome::Coalesced => Err(anyhow!("another scan was already running")),
        }
    }

    /// Catch up, then follow the chain until shutdown or a fatal scan error.
    pub async fn run(&self) -> Result<()> {
        info!("===========================================");
        info!("  Era Scanner Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let source = self.open_source().await?;
        let scanner = self.build_scanner(Arc::clone(&source)).await?;
        let metadata = source.metadata();
        info!(
            "Network: {} ({}), token {} / {} decimals, lag window {} eras",
            metadata.network,
            metadata.endpoint,
            metadata.token_symbol,
            metadata.token_decimals,
            self.config.scan.max_lag
        );

        scanner
            .request_scan()
            .await
            .context("Startup scan failed")?;

        let mut events = self.bus.subscribe(EventFilter::topics(vec![EventTopic::Era]));

        let watcher = EraWatcher::new(
            source,
            self.bus(),
            Duration::from_secs(self.config.chain.poll_interval_secs),
        )
        .starting_at(scanner.active_era());
        tokio::spawn(watcher.run(self.shutdown_rx.clone()));

        let (fatal_tx, mut fatal_rx) = mpsc::channel::<ScanError>(1);
        let mut shutdown = self.shutdown_rx.clone();
        info!("Following active era. Press Ctrl+C to stop.");

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(ChainEvent::NewEra { era }) => {
                        Self::spawn_era_change(Arc::clone(&scanner), era, fatal_tx.clone());
                    }
                    Some(_) => {}
                    None => {
                        warn!("Event bus closed, stopping");
                        return Ok(());
                    }
                },
                Some(err) = fatal_rx.recv() => {
                    self.shutdown();
                    return Err(err).context("Era scan failed");
                }
                _ = shutdown.changed() => {
                    info!("Shutdown signal received");
                    return Ok(());
                }
            }
        }
    }

    /// Run the era-change callback on its own task so later signals can
    /// coalesce into the scan it starts.
    fn spawn_era_change(scanner: Arc<Scanner<S>>, era: EraIndex, fatal_tx: mpsc::Sender<ScanError>) {
        tokio::spawn(async move {
            match scanner.on_era_changed(era).await {
                Ok(Some(ScanOutcome::Completed(report))) => {
                    debug!(
                        "Scan after era {} wrote {} eras",
                        era,
                        report.eras_written.len()
                    );
                }
                Ok(_) => {}
                Err(err) => {
                    let _ = fatal_tx.send(err).await;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChainSourceConfig;
    use es_01_chain_source::adapters::fixture::{ChainFile, CHAIN_FILE, ERAS_DIR};
    use es_01_chain_source::{ChainSourceError, RawEraData};
    use es_02_era_storage::InMemoryEraStore;
    use shared_types::ChainMetadata;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_chain(dir: &Path, active_era: EraIndex) {
        let chain = ChainFile {
            metadata: ChainMetadata {
                network: "kusama".into(),
                endpoint: "wss://kusama-rpc.polkadot.io".into(),
                token_symbol: "KSM".into(),
                token_decimals: 12,
            },
            active_era,
        };
        std::fs::write(dir.join(CHAIN_FILE), serde_json::to_string(&chain).unwrap()).unwrap();
    }

    fn write_era(dir: &Path, era: EraIndex) {
        let raw = RawEraData::empty(era, u64::from(era) * 600, u64::from(era) * 1_000)
            .with_validator("A", 100, 100)
            .with_nominator("N", &["A"])
            .with_ledger("N", 30);
        std::fs::create_dir_all(dir.join(ERAS_DIR)).unwrap();
        std::fs::write(
            dir.join(ERAS_DIR).join(format!("{}.json", era)),
            serde_json::to_string(&raw).unwrap(),
        )
        .unwrap();
    }

    fn runtime(dir: &TempDir) -> ScannerRuntime<InMemoryEraStore> {
        let config = ScannerConfig {
            chain: ChainSourceConfig {
                fixtures_dir: dir.path().to_path_buf(),
                poll_interval_secs: 1,
                network: None,
            },
            ..Default::default()
        };
        ScannerRuntime::new(config, Arc::new(InMemoryEraStore::in_memory()))
    }

    #[tokio::test]
    async fn test_run_once_drains_fixture_backlog() {
        let dir = TempDir::new().unwrap();
        write_chain(dir.path(), 4);
        for era in 1..=3 {
            write_era(dir.path(), era);
        }

        let runtime = runtime(&dir);
        let report = runtime.run_once().await.unwrap();

        assert_eq!(report.eras_written, vec![1, 2, 3]);
        assert_eq!(runtime.store().last_processed_era().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_network_mismatch_refused() {
        let dir = TempDir::new().unwrap();
        write_chain(dir.path(), 2);

        let mut runtime = runtime(&dir);
        runtime.config.chain.network = Some("polkadot".into());

        let err = runtime.run_once().await.unwrap_err();
        assert!(err.to_string().contains("polkadot"));
    }

    #[tokio::test]
    async fn test_missing_era_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_chain(dir.path(), 4);
        write_era(dir.path(), 1);
        write_era(dir.path(), 3);

        let runtime = runtime(&dir);
        let err = runtime.run().await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<ScanError>(),
            Some(&ScanError::Fetch(ChainSourceError::EraTooOld { era: 2 }))
        );
        assert_eq!(runtime.store().last_processed_era().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_follows_era_changes_until_shutdown() {
        let dir = TempDir::new().unwrap();
        write_chain(dir.path(), 2);
        write_era(dir.path(), 1);

        let runtime = Arc::new(runtime(&dir));
        let mut completions = runtime
            .bus()
            .subscribe(EventFilter::topics(vec![EventTopic::Scanner]));

        let handle = {
            let runtime = Arc::clone(&runtime);
            tokio::spawn(async move { runtime.run().await })
        };

        let first = completions.recv().await.unwrap();
        assert_eq!(
            first,
            ChainEvent::ScanCompleted {
                last_era: 1,
                eras_written: 1
            }
        );

        write_era(dir.path(), 2);
        write_chain(dir.path(), 3);

        let next = tokio::time::timeout(Duration::from_secs(10), completions.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            next,
            ChainEvent::ScanCompleted {
                last_era: 2,
                eras_written: 1
            }
        );

        runtime.shutdown();
        handle.await.unwrap().unwrap();
    }
}
