//! Structured log subscriber installation.
//!
//! The interactive dashboard owns the terminal, so it only logs when a log
//! file is configured. The status snapshot mode logs to stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::sync::Mutex;

use crawldash::DashboardError;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_ENV: &str = "CRAWLDASH_LOG";

const DEFAULT_FILTER: &str = "info";

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Discard all log output.
    Disabled,
    /// Append to the named file.
    File(&'a str),
    /// Write to standard error.
    Stderr,
}

/// Installs the global tracing subscriber for `target`.
///
/// # Errors
///
/// Returns [`DashboardError::Io`] when the log file cannot be opened and
/// [`DashboardError::Configuration`] when a subscriber is already installed.
pub fn install(target: LogTarget<'_>) -> Result<(), DashboardError> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter_from_env());
    let result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
    };

    result.map_err(|error| DashboardError::Configuration {
        message: format!("failed to install log subscriber: {error}"),
    })
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log_file(path: &str) -> Result<File, DashboardError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| DashboardError::Io {
            message: format!("failed to open log file {path}: {error}"),
        })
}
