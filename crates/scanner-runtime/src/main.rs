//! # Era Scanner
//!
//! Keeps a store of per-era staking snapshots in step with the chain.
//!
//! ## Exit Status
//!
//! - `0` after `--once`, or after Ctrl+C
//! - non-zero when a scan fails; the last committed era is logged first and a
//!   restart resumes from it

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, warn};

use es_02_era_storage::{EraStore, InMemoryEraStore};
use es_04_era_scanner::ScanReport;
use scanner_runtime::{init_logging, ScannerConfig, ScannerRuntime, StorageBackend};

/// Era scanner: persists one staking snapshot per completed era
#[derive(Parser, Debug)]
#[command(name = "scanner-runtime")]
#[command(about = "Persists per-era staking snapshots, exactly once and in order")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory for the RocksDB store (overrides config and env)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Chain fixture directory (overrides config and env)
    #[arg(long)]
    fixtures_dir: Option<PathBuf>,

    /// Drain the backlog once, print a report and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        ScannerConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = dir;
    }
    if let Some(dir) = args.fixtures_dir {
        config.chain.fixtures_dir = dir;
    }

    init_logging(&config.telemetry)?;

    match config.storage.backend {
        StorageBackend::Memory => {
            if !args.once {
                warn!("Using the in-memory store: progress is lost on exit");
            }
            launch(config, Arc::new(InMemoryEraStore::in_memory()), args.once).await
        }
        StorageBackend::Rocksdb => {
            let store = open_rocksdb(&config)?;
            launch(config, Arc::new(store), args.once).await
        }
    }
}

async fn launch<S: EraStore + 'static>(
    config: ScannerConfig,
    store: Arc<S>,
    once: bool,
) -> Result<()> {
    let runtime = Arc::new(ScannerRuntime::new(config, store));

    if once {
        let report = runtime.run_once().await?;
        print_report(&report);
        return Ok(());
    }

    let signal_runtime = Arc::clone(&runtime);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal_runtime.shutdown(),
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    runtime.run().await
}

fn print_report(report: &ScanReport) {
    match (report.eras_written.first(), report.eras_written.last()) {
        (Some(first), Some(last)) => println!(
            "Wrote {} eras ({}..={}) in {} passes",
            report.eras_written.len(),
            first,
            last,
            report.passes
        ),
        _ => println!("Up to date, nothing written"),
    }
    for gap in &report.gaps {
        println!("Skipped unrecoverable eras {}", gap);
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(
    config: &ScannerConfig,
) -> Result<es_02_era_storage::KvEraStore<es_02_era_storage::RocksDbStore>> {
    use es_02_era_storage::{KvEraStore, RocksDbConfig, RocksDbStore};

    let path = config.storage.data_dir.join("eras");
    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create data directory {}", path.display()))?;

    let kv = RocksDbStore::open(RocksDbConfig {
        path: path.to_string_lossy().to_string(),
        ..Default::default()
    })
    .context("Failed to open RocksDB store")?;
    Ok(KvEraStore::new(kv))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &ScannerConfig) -> Result<InMemoryEraStore> {
    anyhow::bail!("storage backend \"rocksdb\" requires building with `--features rocksdb`")
}
