//! TUI mode for monitoring the crawler and browsing reviews.
//!
//! This module provides the entry point for the interactive terminal user
//! interface.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;
use crossterm::terminal;

use crawldash::telemetry::TracingTelemetrySink;
use crawldash::tui::{
    DashboardApp, set_dashboard_context, set_initial_terminal_size, set_telemetry_sink,
};
use crawldash::{DashboardError, DashboardSettings, HttpDashboardGateway};

/// Runs the interactive dashboard.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be constructed
/// - The TUI fails to initialise or crashes
pub async fn run(settings: &DashboardSettings) -> Result<(), DashboardError> {
    let gateway = HttpDashboardGateway::new(settings.api.clone())?;

    // Model::init() is static, so the gateway and settings are handed over
    // through module-level storage. Setting twice keeps the first value.
    let _ = set_dashboard_context(Arc::new(gateway), settings);
    let _ = set_telemetry_sink(Arc::new(TracingTelemetrySink));
    seed_initial_terminal_size();

    tracing::info!(
        base_url = %settings.api.base_url(),
        poll_interval = ?settings.poll_interval,
        start_tab = settings.start_tab.label(),
        "starting dashboard"
    );

    run_tui().await.map_err(|error| DashboardError::Terminal {
        message: error.to_string(),
    })
}

fn seed_initial_terminal_size() {
    if let Ok((width, height)) = terminal::size() {
        let _ = set_initial_terminal_size(width, height);
    }
}

/// Runs the bubbletea-rs program with the `DashboardApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    // DashboardApp::init() will retrieve its context from module-level storage.
    let program = Program::<DashboardApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    // Ensure stdout is flushed
    io::stdout().flush().ok();

    Ok(())
}
