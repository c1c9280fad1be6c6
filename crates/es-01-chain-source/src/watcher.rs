//! Era-change trigger
//!
//! Polls the chain's active era and publishes `ChainEvent::NewEra` on the
//! shared bus when it changes. Duplicate readings of the same era publish
//! nothing; a reading lower than the last one is logged and ignored.

use crate::error::ChainSourceResult;
use crate::ports::ChainDataSource;
use shared_bus::{ChainEvent, EventPublisher};
use shared_types::EraIndex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Watches the active era and announces transitions
pub struct EraWatcher<C, P>
where
    C: ChainDataSource,
    P: EventPublisher,
{
    source: Arc<C>,
    publisher: Arc<P>,
    poll_interval: Duration,
    last_seen: Option<EraIndex>,
}

impl<C, P> EraWatcher<C, P>
where
    C: ChainDataSource,
    P: EventPublisher,
{
    pub fn new(source: Arc<C>, publisher: Arc<P>, poll_interval: Duration) -> Self {
        Self {
            source,
            publisher,
            poll_interval,
            last_seen: None,
        }
    }

    /// Treat `era` as already announced (the scanner was seeded with it)
    pub fn starting_at(mut self, era: EraIndex) -> Self {
        self.last_seen = Some(era);
        self
    }

    pub fn last_seen(&self) -> Option<EraIndex> {
        self.last_seen
    }

    /// Read the active era once; returns the era if a `NewEra` was published
    pub async fn poll_once(&mut self) -> ChainSourceResult<Option<EraIndex>> {
        let era = self.source.current_active_era().await?;

        match self.last_seen {
            Some(last) if era == last => return Ok(None),
            Some(last) if era < last => {
                warn!(
                    reported = era,
                    last_seen = last,
                    "[es-01] Active era went backwards, ignoring"
                );
                return Ok(None);
            }
            _ => {}
        }

        self.last_seen = Some(era);
        let receivers = self.publisher.publish(ChainEvent::NewEra { era }).await;
        info!(era, receivers, "[es-01] New active era");
        Ok(Some(era))
    }

    /// Poll until `shutdown` flips to true
    ///
    /// Poll errors are logged and the next tick retries; the watcher only
    /// produces signals, so a missed reading delays a scan but never loses one.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        warn!(error = %e, "[es-01] Failed to read active era");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("[es-01] Era watcher stopping");
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryChain;
    use shared_bus::{EventFilter, EventSubscriber, InMemoryEventBus};
    use shared_types::ChainMetadata;

    fn setup(active: EraIndex) -> (Arc<InMemoryChain>, Arc<InMemoryEventBus>) {
        (
            Arc::new(InMemoryChain::new(ChainMetadata::default(), active)),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    #[tokio::test]
    async fn test_first_poll_publishes() {
        let (chain, bus) = setup(10);
        let mut sub = bus.subscribe(EventFilter::all());
        let mut watcher = EraWatcher::new(chain, bus.clone(), Duration::from_secs(1));

        assert_eq!(watcher.poll_once().await.unwrap(), Some(10));
        assert_eq!(sub.try_recv().unwrap(), Some(ChainEvent::NewEra { era: 10 }));
    }

    #[tokio::test]
    async fn test_duplicate_era_is_silent() {
        let (chain, bus) = setup(10);
        let mut watcher =
            EraWatcher::new(chain.clone(), bus.clone(), Duration::from_secs(1)).starting_at(10);

        assert_eq!(watcher.poll_once().await.unwrap(), None);
        assert_eq!(bus.events_published(), 0);

        chain.set_active_era(11);
        assert_eq!(watcher.poll_once().await.unwrap(), Some(11));
        assert_eq!(watcher.poll_once().await.unwrap(), None);
        assert_eq!(bus.events_published(), 1);
    }

    #[tokio::test]
    async fn test_regression_is_ignored() {
        let (chain, bus) = setup(8);
        let mut watcher = EraWatcher::new(chain, bus.clone(), Duration::from_secs(1)).starting_at(9);

        assert_eq!(watcher.poll_once().await.unwrap(), None);
        assert_eq!(watcher.last_seen(), Some(9));
        assert_eq!(bus.events_published(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let (chain, bus) = setup(3);
        let mut sub = bus.subscribe(EventFilter::all());
        let watcher = EraWatcher::new(chain, bus.clone(), Duration::from_secs(6));
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(watcher.run(rx));
        assert_eq!(sub.recv().await, Some(ChainEvent::NewEra { era: 3 }));

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
