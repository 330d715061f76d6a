//! Crawldash CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use crawldash::{DashboardConfig, DashboardError, OperationMode};
use ortho_config::OrthoConfig;

mod cli;

use cli::logging::{self, LogTarget};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), DashboardError> {
    let config = load_config()?;
    let settings = config.resolve()?;
    let mode = config.operation_mode();

    logging::install(log_target(mode, config.log_file.as_deref()))?;

    match mode {
        OperationMode::Dashboard => cli::dashboard_tui::run(&settings).await,
        OperationMode::StatusSnapshot => cli::status_snapshot::run(&settings).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`DashboardError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<DashboardConfig, DashboardError> {
    DashboardConfig::load().map_err(|error| DashboardError::Configuration {
        message: error.to_string(),
    })
}

/// Chooses the log destination for an operation mode.
///
/// The dashboard owns the terminal, so it logs only to an explicit file.
fn log_target(mode: OperationMode, log_file: Option<&str>) -> LogTarget<'_> {
    match (mode, log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (OperationMode::Dashboard, None) => LogTarget::Disabled,
        (OperationMode::StatusSnapshot, None) => LogTarget::Stderr,
    }
}

#[cfg(test)]
mod tests {
    use crawldash::OperationMode;
    use rstest::rstest;

    use super::log_target;
    use crate::cli::logging::LogTarget;

    #[rstest]
    #[case::dashboard_without_file(OperationMode::Dashboard, None, LogTarget::Disabled)]
    #[case::dashboard_with_file(
        OperationMode::Dashboard,
        Some("crawldash.log"),
        LogTarget::File("crawldash.log")
    )]
    #[case::snapshot_without_file(OperationMode::StatusSnapshot, None, LogTarget::Stderr)]
    #[case::snapshot_with_file(
        OperationMode::StatusSnapshot,
        Some("snap.log"),
        LogTarget::File("snap.log")
    )]
    fn log_target_keeps_terminal_clean(
        #[case] mode: OperationMode,
        #[case] log_file: Option<&'static str>,
        #[case] expected: LogTarget<'static>,
    ) {
        assert_eq!(log_target(mode, log_file), expected);
    }
}
