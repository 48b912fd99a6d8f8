//! Log subscriber setup.
//!
//! Installs a `tracing-subscriber` registry with an env filter and either a
//! pretty or a JSON formatting layer.

use crate::config::PartitionerConfig;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry setup errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log filter could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Build the log filter: `RUST_LOG` first, then the configured level.
pub fn build_filter(config: &PartitionerConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Filter(e.to_string()))
}

/// Install the global log subscriber.
pub fn init_logging(config: &PartitionerConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    tracing::info!(
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "[partitioner] Logging initialized"
    );
    Ok(())
}
