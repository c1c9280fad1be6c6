//! # Era Scanner Runtime
//!
//! Process-level glue for the era scanner.
//!
//! - `config` - layered `ScannerConfig` (defaults, TOML, `ES_*` env)
//! - `telemetry` - `tracing` subscriber setup
//! - `runtime` - wiring and the fatal-exit contract

pub mod config;
pub mod runtime;
pub mod telemetry;

pub use config::{ConfigError, ScannerConfig, StorageBackend};
pub use runtime::ScannerRuntime;
pub use telemetry::init_logging;
