//! Diagnostic log setup.
//!
//! All diagnostics go through `tracing`. The subscriber writes to
//! `$PLATE_HOME/logs/plate.log` so stdout stays free for the TUI and for
//! command output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{Config, paths};

/// Log file name inside the logs directory.
pub const LOG_FILE: &str = "plate.log";

/// Returns the path of the log file.
pub fn log_path() -> PathBuf {
    paths::logs_dir().join(LOG_FILE)
}

/// Installs the global subscriber using the configured filter.
///
/// Keep the returned guard alive until exit; dropping it flushes pending
/// log lines.
///
/// # Errors
/// Returns an error if the log directory cannot be created, the filter is
/// invalid, or a global subscriber is already installed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    init_in(&paths::logs_dir(), &config.effective_log_filter())
}

/// Installs the global subscriber writing into `dir`.
///
/// # Errors
/// See [`init`].
pub fn init_in(dir: &Path, filter: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter: {filter}"))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
