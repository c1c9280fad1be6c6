//! Scan coordinator domain: state machine and backlog planning

pub mod backlog;
pub mod state;

pub use backlog::Backlog;
pub use state::{Admission, PassEnd, ScanPhase, ScanState};
