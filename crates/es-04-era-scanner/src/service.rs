//! # Era Scan Coordinator
//!
//! Single-flight reconciliation loop. Each pass reads the committed era from
//! the store, plans the backlog against the active era and then fetches,
//! aggregates and commits every era in it, strictly in ascending order.

use crate::config::EraScanConfig;
use crate::domain::{Admission, Backlog, PassEnd, ScanState};
use crate::error::{ScanError, ScanResult};
use crate::ports::inbound::{EraScanApi, ScanOutcome, ScanReport};
use async_trait::async_trait;
use es_01_chain_source::ChainDataSource;
use es_02_era_storage::EraStore;
use es_03_snapshot_aggregator::{aggregate, Aggregation};
use parking_lot::Mutex;
use shared_bus::{ChainEvent, EventPublisher};
use shared_types::EraIndex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct EraScanner<C: ChainDataSource, S: EraStore> {
    source: Arc<C>,
    store: Arc<S>,
    config: EraScanConfig,
    state: Mutex<ScanState>,
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl<C: ChainDataSource, S: EraStore> EraScanner<C, S> {
    /// Create a coordinator whose active era starts at `active_era`.
    pub fn new(
        source: Arc<C>,
        store: Arc<S>,
        config: EraScanConfig,
        active_era: EraIndex,
    ) -> ScanResult<Self> {
        config.validate()?;
        Ok(Self {
            source,
            store,
            config,
            state: Mutex::new(ScanState::new(active_era)),
            publisher: None,
        })
    }

    /// Create a coordinator seeded with the chain's current active era.
    pub async fn bootstrap(source: Arc<C>, store: Arc<S>, config: EraScanConfig) -> ScanResult<Self> {
        let active_era = source.current_active_era().await?;
        info!("[es-04] Active era at startup: {}", active_era);
        Self::new(source, store, config, active_era)
    }

    /// Announce completed loops and gaps on the bus.
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn state(&self) -> ScanState {
        *self.state.lock()
    }

    pub fn config(&self) -> &EraScanConfig {
        &self.config
    }

    async fn publish(&self, event: ChainEvent) {
        if let Some(publisher) = &self.publisher {
            publisher.publish(event).await;
        }
    }

    async fn run_loop(&self) -> ScanResult<ScanReport> {
        let mut in_flight = InFlight::new(&self.state);
        let mut report = ScanReport::default();

        loop {
            report.passes += 1;
            self.run_pass(&mut report).await?;

            if in_flight.finish_pass() == PassEnd::Done {
                return Ok(report);
            }
            debug!("[es-04] Rescan requested during pass {}", report.passes);
        }
    }

    async fn run_pass(&self, report: &mut ScanReport) -> ScanResult<()> {
        // Never cached: the store is the only source of truth for progress
        let last_processed = self.store.last_processed_era().await?;
        let current = self.state.lock().active_era;
        let backlog = Backlog::plan(last_processed, current, self.config.max_lag);

        if let Some(gap) = backlog.gap {
            warn!(
                "[es-04] ⚠️ {} eras behind (limit {}), skipping unrecoverable eras {}",
                current - last_processed,
                self.config.max_lag,
                gap
            );
            self.store.record_gap(gap).await?;
            report.gaps.push(gap);
            self.publish(ChainEvent::HistoryGap(gap)).await;
        }

        if backlog.is_empty() {
            debug!(
                "[es-04] Up to date (last processed {}, active {})",
                last_processed, current
            );
            return Ok(());
        }

        info!(
            "[es-04] Processing eras {}..={} ({} eras)",
            backlog.start,
            backlog.end,
            backlog.len()
        );
        for era in backlog.eras() {
            self.process_era(era).await?;
            report.eras_written.push(era);
        }
        Ok(())
    }

    /// Fetch, aggregate and commit one era.
    async fn process_era(&self, era: EraIndex) -> ScanResult<()> {
        let raw = self.source.fetch_era_snapshot(era).await?;
        let anchor = raw.era_last_block();
        if anchor.era != era {
            return Err(ScanError::EraMismatch {
                requested: era,
                returned: anchor.era,
            });
        }
        debug!("[es-04] Era {} read at block {}", era, anchor.block);

        let Aggregation { chain_data, report } =
            aggregate(era, &raw, &self.source.metadata(), &raw.identities);
        if !report.dropped_nominators.is_empty() {
            debug!(
                "[es-04] Era {}: {} nominators without ledger dropped",
                era,
                report.dropped_nominators.len()
            );
        }

        let validators = chain_data.validators.len();
        let voters = chain_data.voter_count();
        self.store.insert(chain_data).await?;

        info!(
            "[es-04] ✅ Era {} committed ({} validators, {} voters)",
            era, validators, voters
        );
        Ok(())
    }

    async fn log_abort(&self, err: &ScanError) {
        match self.store.last_processed_era().await {
            Ok(last) => error!(
                "[es-04] ❌ Scan aborted: {}. Last committed era: {}",
                err, last
            ),
            Err(read_err) => error!(
                "[es-04] ❌ Scan aborted: {}. Last committed era unknown ({})",
                err, read_err
            ),
        }
    }
}

#[async_trait]
impl<C: ChainDataSource, S: EraStore> EraScanApi for EraScanner<C, S> {
    async fn request_scan(&self) -> ScanResult<ScanOutcome> {
        let admission = self.state.lock().admit();
        if admission == Admission::Coalesced {
            debug!("[es-04] Scan in flight, rescan flagged");
            return Ok(ScanOutcome::Coalesced);
        }

        match self.run_loop().await {
            Ok(report) => {
                let last_era = self.store.last_processed_era().await?;
                info!(
                    "[es-04] Scan complete: {} eras written in {} passes, last era {}",
                    report.eras_written.len(),
                    report.passes,
                    last_era
                );
                self.publish(ChainEvent::ScanCompleted {
                    last_era,
                    eras_written: report.eras_written.len(),
                })
                .await;
                Ok(ScanOutcome::Completed(report))
            }
            Err(err) => {
                self.log_abort(&err).await;
                Err(err)
            }
        }
    }

    async fn on_era_changed(&self, era: EraIndex) -> ScanResult<Option<ScanOutcome>> {
        let previous = {
            let mut state = self.state.lock();
            let previous = state.active_era;
            if !state.advance_era(era) {
                None
            } else {
                Some(previous)
            }
        };

        let Some(previous) = previous else {
            debug!("[es-04] Ignoring era notification {} (not newer)", era);
            return Ok(None);
        };

        info!("[es-04] 🆕 Active era {} -> {}", previous, era);
        self.request_scan().await.map(Some)
    }

    fn active_era(&self) -> EraIndex {
        self.state.lock().active_era
    }
}

/// Holds the running phase for one loop.
///
/// Falls back to idle when dropped without a clean finish, so a failed or
/// cancelled loop never leaves the coordinator stuck in flight.
struct InFlight<'a> {
    state: &'a Mutex<ScanState>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a Mutex<ScanState>) -> Self {
        Self { state, armed: true }
    }

    fn finish_pass(&mut self) -> PassEnd {
        let end = self.state.lock().finish_pass();
        if end == PassEnd::Done {
            self.armed = false;
        }
        end
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.lock().abort();
        }
    }
}
