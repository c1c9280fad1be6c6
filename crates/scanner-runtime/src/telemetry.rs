//! Logging setup
//!
//! `ES_JSON_LOGS=true` gives one JSON object per line for log shippers;
//! otherwise lines are formatted for a terminal.

use crate::config::TelemetryConfig;
use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the process-wide subscriber. Fails if one is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log filter {:?}", config.log_level))?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json_logs {
        registry
            .with(fmt::layer().json().flatten_event(true).with_current_span(false))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };
    installed.map_err(|e| anyhow!("failed to install logger: {}", e))
}
