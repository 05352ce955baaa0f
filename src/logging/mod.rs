//! Application logging functionality
//!
//! Installs the `tracing` subscriber for the binary and manages the
//! optional log file under ~/.config/glyphpath/logs/

use crate::core::config_file::ConfigFile;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither RUST_LOG nor the config file sets one
pub const DEFAULT_FILTER: &str = "info";

/// Get the name of the current log file
pub fn current_log_file_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    format!("glyphpath-{}.log", timestamp)
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    ConfigFile::logs_dir().join(current_log_file_name())
}

/// Build the filter: RUST_LOG wins, then the configured level, then the default.
pub fn env_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Logs always go to stderr so stdout stays clean for SVG or JSON output.
/// With `log_to_file`, they are also appended to today's log file; keep the
/// returned guard alive until exit so buffered lines are flushed.
pub fn init(configured: Option<&str>, log_to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = if log_to_file {
        let logs_dir = ConfigFile::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        let appender = tracing_appender::rolling::never(&logs_dir, current_log_file_name());
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter(configured))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;

    if log_to_file {
        tracing::info!(
            "=== glyphpath started at {} ===",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        tracing::info!("Logs written to: {:?}", current_log_file());
    }

    Ok(guard)
}
