//! # Publishing Side
//!
//! `InMemoryEventBus` fans every `ChainEvent` out to all live subscriptions
//! over a single `tokio::sync::broadcast` channel; topic filtering happens on
//! the receiving end.

use crate::events::{ChainEvent, EventFilter};
use crate::subscriber::{EventSubscriber, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::trace;

/// Anything that can announce chain events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Broadcast `event`; returns how many subscriptions it reached.
    ///
    /// Zero receivers is not an error. The watcher runs before anyone
    /// subscribes during startup.
    async fn publish(&self, event: ChainEvent) -> usize;

    /// Events handed to `publish` since creation, delivered or not.
    fn events_published(&self) -> u64;
}

/// Process-local bus shared by the watcher, the scanner and the runtime.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<ChainEvent>,
    published: AtomicU64,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// `capacity` events may be buffered per subscription before the oldest
    /// are skipped.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            published: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, filter: EventFilter) -> Subscription {
        trace!(topics = ?filter.topics, "[bus] subscribe");
        Subscription::new(self.sender.subscribe(), filter)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: ChainEvent) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        let topic = event.topic();

        // send only fails when nobody is subscribed
        let receivers = self.sender.send(event).unwrap_or(0);
        trace!(?topic, receivers, "[bus] publish");
        receivers
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
