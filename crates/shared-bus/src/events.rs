//! # Chain Events
//!
//! Every event that flows through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{EraGap, EraIndex};

/// Notifications exchanged between the scanner subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainEvent {
    // =========================================================================
    // SUBSYSTEM 1: CHAIN SOURCE
    // =========================================================================
    /// The chain's active era advanced.
    /// Source: EraWatcher (es-01) | Target: EraScanner (es-04)
    NewEra {
        /// The newly active era.
        era: EraIndex,
    },

    // =========================================================================
    // SUBSYSTEM 4: ERA SCANNER
    // =========================================================================
    /// A reconciliation loop finished without error.
    ScanCompleted {
        /// Highest era committed to the store, 0 if none.
        last_era: EraIndex,
        /// Number of eras written by the loop.
        eras_written: usize,
    },

    /// A range of eras fell outside the lag window and was skipped.
    HistoryGap(EraGap),
}

impl ChainEvent {
    /// Get the topic this event belongs to.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            ChainEvent::NewEra { .. } => EventTopic::Era,
            ChainEvent::ScanCompleted { .. } | ChainEvent::HistoryGap(_) => EventTopic::Scanner,
        }
    }
}

/// Coarse grouping used by subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Era transitions reported by the chain.
    Era,
    /// Scan coordinator progress.
    Scanner,
    /// Matches every event.
    All,
}

/// Which topics a subscription wants; no topics means everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    #[must_use]
    pub fn all() -> Self {
        Self { topics: Vec::new() }
    }

    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    #[must_use]
    pub fn matches(&self, event: &ChainEvent) -> bool {
        let topic = event.topic();
        self.topics.is_empty()
            || self
                .topics
                .iter()
                .any(|t| *t == EventTopic::All || *t == topic)
    }
}
