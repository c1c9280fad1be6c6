//! # Shared Bus
//!
//! Era transitions and scan progress, broadcast inside one process.
//!
//! ```text
//!   EraWatcher (es-01) ── NewEra ─────────┐
//!                                         ▼
//!                               InMemoryEventBus ── Era topic ──→ runtime ──→ EraScanner
//!                                         ▲
//!   EraScanner (es-04) ── ScanCompleted ──┤
//!                      ── HistoryGap ─────┘
//! ```
//!
//! Nothing on the bus is authoritative. The scanner re-reads its position
//! from the store on every pass, so an event skipped by a lagging subscriber
//! only delays work until the next era change.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{ChainEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
