//! Startup context storage for the dashboard TUI.
//!
//! This module owns the global `OnceLock` values used during TUI bootstrapping
//! and provides the setter/getter functions consumed by CLI wiring and
//! `DashboardApp::init()`.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::terminal;

use crate::api::error::DashboardError;
use crate::api::gateway::DashboardGateway;
use crate::api::models::{
    CrawlerAction, CrawlerStatusUpdate, ReviewPage, ReviewStats, RetryOutcome,
};
use crate::api::query::ReviewQuery;
use crate::config::DashboardSettings;
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

use super::app::DEFAULT_POLL_INTERVAL;
use super::tab::Tab;

/// Global storage for the backend gateway and runtime settings.
///
/// This is set before the TUI program starts and read by
/// `DashboardApp::init()`.
static DASHBOARD_CONTEXT: OnceLock<DashboardContext> = OnceLock::new();

/// Global storage for initial terminal dimensions.
///
/// This is set before the TUI program starts and read by `DashboardApp::init()`
/// so the first frame uses the actual terminal size.
static INITIAL_TERMINAL_SIZE: OnceLock<(u16, u16)> = OnceLock::new();

/// Global storage for telemetry sink.
static TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Static fallback telemetry sink to avoid allocations on each call.
static DEFAULT_TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Gateway and view settings the application is started with.
struct DashboardContext {
    gateway: Arc<dyn DashboardGateway>,
    poll_interval: Duration,
    start_tab: Tab,
}

/// Sets the gateway and settings for the TUI application.
///
/// This must be called before starting the bubbletea-rs program. Without it
/// every request fails with a configuration error.
///
/// # Returns
///
/// `true` if the context was set, `false` if it was already set.
pub fn set_dashboard_context(
    gateway: Arc<dyn DashboardGateway>,
    settings: &DashboardSettings,
) -> bool {
    DASHBOARD_CONTEXT
        .set(DashboardContext {
            gateway,
            poll_interval: settings.poll_interval,
            start_tab: settings.start_tab,
        })
        .is_ok()
}

/// Sets the initial terminal dimensions for the TUI application.
///
/// # Returns
///
/// `true` if the dimensions were set, `false` if they were already set.
pub fn set_initial_terminal_size(width: u16, height: u16) -> bool {
    INITIAL_TERMINAL_SIZE.set((width, height)).is_ok()
}

/// Sets the telemetry sink for the TUI application.
///
/// Without this, a no-op sink is used.
///
/// # Returns
///
/// `true` if the sink was set, `false` if it was already set.
pub fn set_telemetry_sink(sink: Arc<dyn TelemetrySink>) -> bool {
    TELEMETRY_SINK.set(sink).is_ok()
}

/// Gets the configured gateway and settings.
///
/// Falls back to default settings and a gateway that rejects every call when
/// no context was stored.
pub(crate) fn get_dashboard_context() -> (Arc<dyn DashboardGateway>, Duration, Tab) {
    DASHBOARD_CONTEXT.get().map_or_else(
        || {
            (
                Arc::new(UnconfiguredGateway) as Arc<dyn DashboardGateway>,
                DEFAULT_POLL_INTERVAL,
                Tab::default(),
            )
        },
        |context| {
            (
                Arc::clone(&context.gateway),
                context.poll_interval,
                context.start_tab,
            )
        },
    )
}

/// Gets the telemetry sink, returning a no-op sink if not configured.
///
/// Uses a static fallback sink to avoid allocating a new `Arc` on each call
/// when no sink has been configured.
pub(crate) fn get_telemetry_sink() -> Arc<dyn TelemetrySink> {
    TELEMETRY_SINK.get().cloned().unwrap_or_else(|| {
        Arc::clone(DEFAULT_TELEMETRY_SINK.get_or_init(|| Arc::new(NoopTelemetrySink)))
    })
}

/// Gets the initial terminal dimensions from storage.
///
/// Returns the stored dimensions, the current terminal size, or fallback
/// dimensions, in that order of preference.
pub(crate) fn get_initial_terminal_size() -> (u16, u16) {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    INITIAL_TERMINAL_SIZE
        .get()
        .copied()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .or_else(|| {
            terminal::size()
                .ok()
                .filter(|(width, height)| *width > 0 && *height > 0)
        })
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}

/// Gateway used when the program starts without a stored context.
#[derive(Debug, Clone, Copy)]
struct UnconfiguredGateway;

impl UnconfiguredGateway {
    fn error() -> DashboardError {
        DashboardError::Configuration {
            message: "dashboard context not configured".to_owned(),
        }
    }
}

#[async_trait]
impl DashboardGateway for UnconfiguredGateway {
    async fn crawler_status(&self) -> Result<CrawlerStatusUpdate, DashboardError> {
        Err(Self::error())
    }

    async fn control_crawler(
        &self,
        _action: CrawlerAction,
    ) -> Result<CrawlerStatusUpdate, DashboardError> {
        Err(Self::error())
    }

    async fn list_reviews(&self, _query: &ReviewQuery) -> Result<ReviewPage, DashboardError> {
        Err(Self::error())
    }

    async fn list_topics(&self) -> Result<Vec<String>, DashboardError> {
        Err(Self::error())
    }

    async fn review_stats(&self) -> Result<ReviewStats, DashboardError> {
        Err(Self::error())
    }

    async fn retry_failed(&self) -> Result<RetryOutcome, DashboardError> {
        Err(Self::error())
    }
}
