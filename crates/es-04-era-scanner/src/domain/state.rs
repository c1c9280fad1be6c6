//! Single-flight scan state
//!
//! Both flags of the classic "in flight / rescan requested" pair live in one
//! enum, so they can only change together under the coordinator's lock.

use shared_types::EraIndex;

/// Coordinator phase
///
/// State Machine:
/// ```text
/// [IDLE] ──request──→ [RUNNING] ──request──→ [RESCAN_PENDING]
///   ↑                    │                        │
///   │                    │ pass done              │ pass done
///   └────────────────────┘                        └──→ [RUNNING] (next pass)
///
/// any pass error ──→ [IDLE]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScanPhase {
    /// No reconciliation loop is running
    #[default]
    Idle,
    /// A loop is running and nobody asked for another pass
    Running,
    /// A loop is running and at least one request arrived during the pass
    RescanPending,
}

/// Answer to a scan request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Caller won the race and must run the loop
    Start,
    /// A loop is already running; it will do one more pass
    Coalesced,
}

/// What the loop does after finishing a pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassEnd {
    Again,
    Done,
}

/// Process-wide scan state, owned by the coordinator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScanState {
    /// Latest active era reported by the chain
    pub active_era: EraIndex,
    pub phase: ScanPhase,
}

impl ScanState {
    pub fn new(active_era: EraIndex) -> Self {
        Self {
            active_era,
            phase: ScanPhase::Idle,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.phase != ScanPhase::Idle
    }

    /// Record a newly reported active era.
    ///
    /// Returns false for duplicates and regressions, which are ignored.
    pub fn advance_era(&mut self, era: EraIndex) -> bool {
        if era <= self.active_era {
            return false;
        }
        self.active_era = era;
        true
    }

    /// Handle a scan request.
    pub fn admit(&mut self) -> Admission {
        match self.phase {
            ScanPhase::Idle => {
                self.phase = ScanPhase::Running;
                Admission::Start
            }
            ScanPhase::Running | ScanPhase::RescanPending => {
                self.phase = ScanPhase::RescanPending;
                Admission::Coalesced
            }
        }
    }

    /// Close a successful pass.
    ///
    /// Checking for a pending rescan and going idle happen in one step, so a
    /// request can never land between them and be lost.
    pub fn finish_pass(&mut self) -> PassEnd {
        match self.phase {
            ScanPhase::RescanPending => {
                self.phase = ScanPhase::Running;
                PassEnd::Again
            }
            ScanPhase::Running | ScanPhase::Idle => {
                self.phase = ScanPhase::Idle;
                PassEnd::Done
            }
        }
    }

    /// Drop back to idle after a failed pass. Pending requests are discarded.
    pub fn abort(&mut self) {
        self.phase = ScanPhase::Idle;
    }
}
