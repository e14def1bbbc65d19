//! File-based logging setup.
//!
//! The TUI owns the terminal, so logs go to ${DOORMAN_HOME}/logs/doorman.log
//! instead of stderr. The returned guard must be kept alive for the process
//! lifetime or buffered lines are lost.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

/// Environment variable overriding the configured log filter.
const ENV_LOG: &str = "DOORMAN_LOG";

/// Initializes the global tracing subscriber with a non-blocking file writer.
///
/// Filter precedence: `DOORMAN_LOG` env var, then `default_filter` from config.
///
/// # Errors
/// Returns an error if the log directory cannot be created or the subscriber
/// is already set.
pub fn init(default_filter: &str) -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, "doorman.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))?;

    Ok(guard)
}
