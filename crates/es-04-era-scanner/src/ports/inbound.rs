//! # Inbound Ports (Driving Ports)
//!
//! API the runtime uses to drive the coordinator.

use crate::error::ScanResult;
use async_trait::async_trait;
use shared_types::{EraGap, EraIndex};

/// Summary of one reconciliation loop
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Passes run, including those triggered by coalesced requests
    pub passes: u32,
    /// Eras committed, in commit order
    pub eras_written: Vec<EraIndex>,
    /// Ranges skipped because they fell outside the lag window
    pub gaps: Vec<EraGap>,
}

/// Result of a scan request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A loop was already in flight; it was asked for one more pass
    Coalesced,
    /// This call ran the loop to completion
    Completed(ScanReport),
}

#[async_trait]
pub trait EraScanApi: Send + Sync {
    /// Run the reconciliation loop, or flag a rescan if one is running.
    ///
    /// Safe to call concurrently from any number of tasks; at most one loop
    /// runs at a time.
    async fn request_scan(&self) -> ScanResult<ScanOutcome>;

    /// Era-change callback.
    ///
    /// Returns `None` when `era` is not newer than the known active era.
    async fn on_era_changed(&self, era: EraIndex) -> ScanResult<Option<ScanOutcome>>;

    fn active_era(&self) -> EraIndex;
}
