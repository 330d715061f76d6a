//! Main TUI application model implementing the MVU pattern.
//!
//! [`DashboardApp`] is the tab shell: it owns which view is mounted, routes
//! messages to that view's handlers and turns their requests into async
//! commands. Mounting a view creates its state afresh under a new session;
//! unmounting simply drops it, so late results and timer ticks addressed to
//! the old session find nothing to update.
//!
//! # Module Structure
//!
//! - `commands`: Async commands wrapping gateway calls and the poll timer
//! - `crawler_handlers`: Crawler polling and start/stop handling
//! - `review_handlers`: Review query, paging, detail and retry handling
//! - `lifecycle_handlers`: Startup, tab switching, help and resize
//! - `model_impl`: `bubbletea_rs::Model` implementation
//! - `rendering`: View rendering methods for terminal output

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bubbletea_rs::Cmd;

use crate::api::gateway::DashboardGateway;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::input::InputContext;
use super::messages::AppMsg;
use super::state::{CrawlerViewState, ReviewQueryState, SessionId};
use super::tab::Tab;

mod commands;
mod crawler_handlers;
mod lifecycle_handlers;
mod model_impl;
mod rendering;
mod review_handlers;

/// Default interval between crawler status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// The view currently mounted by the shell.
#[derive(Debug, Clone)]
pub(crate) enum MountedView {
    /// Nothing mounted yet (before `Initialized`).
    None,
    /// Review list with statistics.
    Reviews(ReviewQueryState),
    /// Crawler status view.
    Crawler(CrawlerViewState),
}

/// Main application model for the crawler dashboard TUI.
pub struct DashboardApp {
    gateway: Arc<dyn DashboardGateway>,
    telemetry: Arc<dyn TelemetrySink>,
    poll_interval: Duration,
    start_tab: Tab,
    active_tab: Tab,
    pub(crate) view: MountedView,
    next_session: SessionId,
    /// Terminal dimensions.
    width: u16,
    height: u16,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
    has_initialized: bool,
}

impl fmt::Debug for DashboardApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardApp")
            .field("poll_interval", &self.poll_interval)
            .field("active_tab", &self.active_tab)
            .field("view", &self.view)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("show_help", &self.show_help)
            .finish_non_exhaustive()
    }
}

impl DashboardApp {
    /// Creates an application that mounts `start_tab` once initialised.
    #[must_use]
    pub fn new(gateway: Arc<dyn DashboardGateway>, poll_interval: Duration, start_tab: Tab) -> Self {
        Self {
            gateway,
            telemetry: Arc::new(NoopTelemetrySink),
            poll_interval,
            start_tab,
            active_tab: start_tab,
            view: MountedView::None,
            next_session: SessionId::new(1),
            width: 80,
            height: 24,
            show_help: false,
            has_initialized: false,
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Sets the terminal dimensions used before the first resize event.
    #[must_use]
    pub const fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns the active tab.
    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Returns the review list state when that view is mounted.
    #[must_use]
    pub fn reviews(&self) -> Option<&ReviewQueryState> {
        match &self.view {
            MountedView::Reviews(state) => Some(state),
            _ => None,
        }
    }

    /// Returns the crawler view state when that view is mounted.
    #[must_use]
    pub fn crawler(&self) -> Option<&CrawlerViewState> {
        match &self.view {
            MountedView::Crawler(state) => Some(state),
            _ => None,
        }
    }

    /// Returns whether the help overlay is shown.
    #[must_use]
    pub const fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Returns the mounted review state if it belongs to `session`.
    pub(crate) fn reviews_for(&mut self, session: SessionId) -> Option<&mut ReviewQueryState> {
        match &mut self.view {
            MountedView::Reviews(state) if state.session() == session => Some(state),
            _ => None,
        }
    }

    /// Returns the mounted crawler state if it belongs to `session`.
    pub(crate) fn crawler_for(&mut self, session: SessionId) -> Option<&mut CrawlerViewState> {
        match &mut self.view {
            MountedView::Crawler(state) if state.session() == session => Some(state),
            _ => None,
        }
    }

    pub(crate) fn reviews_mut(&mut self) -> Option<&mut ReviewQueryState> {
        match &mut self.view {
            MountedView::Reviews(state) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn crawler_mut(&mut self) -> Option<&mut CrawlerViewState> {
        match &mut self.view {
            MountedView::Crawler(state) => Some(state),
            _ => None,
        }
    }

    /// Records a telemetry event.
    pub(crate) fn record(&self, event: TelemetryEvent) {
        self.telemetry.record(event);
    }

    /// Returns the current input context for context-aware key mapping.
    pub(crate) fn input_context(&self) -> InputContext {
        match &self.view {
            MountedView::Crawler(_) => InputContext::Crawler,
            MountedView::Reviews(state) if state.detail().is_some() => InputContext::ReviewDetail,
            MountedView::Reviews(state) if state.is_editing_search() => {
                InputContext::SearchEditing
            }
            MountedView::Reviews(_) | MountedView::None => InputContext::ReviewList,
        }
    }

    /// Handles a message and updates state accordingly.
    ///
    /// This method is the core update function that processes all application
    /// messages and returns any resulting commands. It delegates to specialised
    /// handlers for each message category to keep cyclomatic complexity low.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_navigation() {
            return self.handle_navigation_msg(msg);
        }
        if msg.is_query() {
            return self.handle_query_msg(msg);
        }
        if msg.is_crawler() {
            return self.handle_crawler_msg(msg);
        }
        if msg.is_data() {
            return self.handle_data_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
