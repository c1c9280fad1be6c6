//! # Shared Types Crate
//!
//! Domain entities exchanged between the era-scanner subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every cross-subsystem type is defined here.
//! - **Immutable Snapshots**: a `ChainData` value is built once per era and
//!   never mutated after it leaves the aggregator.
//! - **Plain Data**: no I/O, no async, serde derives only.

pub mod entities;

pub use entities::*;
