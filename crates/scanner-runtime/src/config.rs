//! # Scanner Configuration
//!
//! Layered configuration: defaults, then an optional TOML file, then `ES_*`
//! environment variables.
//!
//! ```toml
//! [chain]
//! fixtures_dir = "./fixtures/kusama"
//! poll_interval_secs = 30
//! network = "kusama"
//!
//! [storage]
//! backend = "rocksdb"
//! data_dir = "./data"
//!
//! [scan]
//! max_lag = 84
//!
//! [telemetry]
//! log_level = "info,es_04_era_scanner=debug"
//! json_logs = false
//! ```

use es_04_era_scanner::EraScanConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete scanner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub chain: ChainSourceConfig,
    pub storage: StorageConfig,
    pub scan: EraScanConfig,
    pub telemetry: TelemetryConfig,
}

/// Where chain data comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSourceConfig {
    /// Fixture directory (`chain.json` + `eras/`).
    pub fixtures_dir: PathBuf,
    /// Seconds between active-era polls.
    pub poll_interval_secs: u64,
    /// Expected network name; startup fails if the source reports another.
    pub network: Option<String>,
}

impl Default for ChainSourceConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from("./fixtures"),
            poll_interval_secs: 30,
            network: None,
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost on exit; for dry runs and tests.
    #[default]
    Memory,
    /// RocksDB under `data_dir` (feature `rocksdb`).
    Rocksdb,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "rocksdb" => Ok(StorageBackend::Rocksdb),
            _ => Err(()),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Data directory for the RocksDB backend.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive string.
    pub log_level: String,
    /// JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ScannerConfig {
    /// Defaults, overlaid with `path` when given, overlaid with the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `ES_*` overrides using `lookup` to read variables.
    ///
    /// # Environment Variables
    ///
    /// - `ES_FIXTURES_DIR`: fixture directory
    /// - `ES_POLL_INTERVAL_SECS`: active-era poll interval
    /// - `ES_NETWORK`: expected network name
    /// - `ES_DATA_DIR`: RocksDB directory
    /// - `ES_STORAGE_BACKEND`: `memory` or `rocksdb`
    /// - `ES_MAX_LAG`: lag window in eras
    /// - `ES_LOG_LEVEL` or `RUST_LOG`: log filter
    /// - `ES_JSON_LOGS`: JSON log output
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(dir) = lookup("ES_FIXTURES_DIR") {
            self.chain.fixtures_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup("ES_POLL_INTERVAL_SECS") {
            self.chain.poll_interval_secs = parse_env("ES_POLL_INTERVAL_SECS", secs)?;
        }
        if let Some(network) = lookup("ES_NETWORK") {
            self.chain.network = Some(network);
        }
        if let Some(dir) = lookup("ES_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup("ES_STORAGE_BACKEND") {
            self.storage.backend = parse_env("ES_STORAGE_BACKEND", backend)?;
        }
        if let Some(lag) = lookup("ES_MAX_LAG") {
            self.scan.max_lag = parse_env("ES_MAX_LAG", lag)?;
        }
        if let Some(level) = lookup("ES_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            self.telemetry.log_level = level;
        }
        if let Some(json) = lookup("ES_JSON_LOGS") {
            self.telemetry.json_logs = json.eq_ignore_ascii_case("true") || json == "1";
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scan
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.chain.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
