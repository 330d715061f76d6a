//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.crawldash.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `CRAWLDASH_API_BASE_URL`,
//!    `CRAWLDASH_POLL_INTERVAL_MS`, ...
//! 4. **Command-line arguments** – `--api-base-url`/`-u`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_base_url = "http://localhost:8081/api"
//! poll_interval_ms = 5000
//! request_timeout_secs = 10
//! log_file = "crawldash.log"
//! start_tab = "crawler"
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::error::DashboardError;
use crate::api::gateway::ApiSettings;
use crate::tui::Tab;

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";
const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Interactive terminal dashboard.
    Dashboard,
    /// Print one crawler status summary and exit.
    StatusSnapshot,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use crawldash::DashboardConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = DashboardConfig::load().expect("failed to load configuration");
/// let settings = config.resolve().expect("configuration should be valid");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "CRAWLDASH",
    discovery(
        dotfile_name = ".crawldash.toml",
        config_file_name = "crawldash.toml",
        app_name = "crawldash"
    )
)]
pub struct DashboardConfig {
    /// Base URL of the crawler backend API.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base-url <URL>` or `-u <URL>`
    /// - Environment: `CRAWLDASH_API_BASE_URL`
    /// - Config file: `api_base_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub api_base_url: String,

    /// Interval between crawler status polls, in milliseconds.
    #[ortho_config()]
    pub poll_interval_ms: u64,

    /// Timeout applied to every backend request, in seconds.
    #[ortho_config()]
    pub request_timeout_secs: u64,

    /// File that receives structured logs while the dashboard runs.
    ///
    /// Logging is disabled in dashboard mode when unset, so log lines never
    /// corrupt the terminal UI.
    #[ortho_config(cli_short = 'l')]
    pub log_file: Option<String>,

    /// Tab shown when the dashboard starts (`reviews` or `crawler`).
    ///
    /// Can be provided via:
    /// - CLI: `--start-tab <TAB>` or `-t <TAB>`
    /// - Environment: `CRAWLDASH_START_TAB`
    /// - Config file: `start_tab = "crawler"`
    #[ortho_config(cli_short = 't')]
    pub start_tab: Option<String>,

    /// Prints a one-shot crawler status summary instead of starting the TUI.
    ///
    /// Can be provided via:
    /// - CLI: `--status-once` / `-s`
    /// - Config file: `status_once = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so there is no `CRAWLDASH_STATUS_ONCE`.
    #[ortho_config(cli_short = 's')]
    pub status_once: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_file: None,
            start_tab: None,
            status_once: false,
        }
    }
}

/// Validated runtime settings injected into the gateway and the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Backend connection settings.
    pub api: ApiSettings,
    /// Interval between crawler status polls.
    pub poll_interval: Duration,
    /// Tab shown at startup.
    pub start_tab: Tab,
}

impl DashboardConfig {
    /// Determines the operation mode from the configuration.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.status_once {
            OperationMode::StatusSnapshot
        } else {
            OperationMode::Dashboard
        }
    }

    /// Validates the configuration and converts it into runtime settings.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Configuration`] when the base URL is not a
    /// valid HTTP(S) URL, an interval is zero, or the start tab is unknown.
    pub fn resolve(&self) -> Result<DashboardSettings, DashboardError> {
        if self.poll_interval_ms == 0 {
            return Err(DashboardError::Configuration {
                message: "poll_interval_ms must be greater than zero".to_owned(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(DashboardError::Configuration {
                message: "request_timeout_secs must be greater than zero".to_owned(),
            });
        }

        let api = ApiSettings::parse(
            &self.api_base_url,
            Duration::from_secs(self.request_timeout_secs),
        )?;
        let start_tab = self
            .start_tab
            .as_deref()
            .map_or(Ok(Tab::Reviews), Tab::parse)?;

        Ok(DashboardSettings {
            api,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            start_tab,
        })
    }
}

#[cfg(test)]
mod tests;
