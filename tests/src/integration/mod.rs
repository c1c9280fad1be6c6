//! Cross-subsystem integration scenarios

pub mod end_to_end;
pub mod fixture_flow;
pub mod scan_flow;
