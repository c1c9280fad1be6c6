//! # Era Scanner Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared raw-data builders and fixture directories
//! └── integration/      # Cross-subsystem flows
//!     ├── end_to_end.rs     # aggregate → store → read back
//!     ├── scan_flow.rs      # watcher → bus → coordinator
//!     └── fixture_flow.rs   # JSON fixtures → coordinator → store
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p es-tests
//! cargo test -p es-tests --features rocksdb
//! ```

pub mod fixtures;
pub mod integration;
