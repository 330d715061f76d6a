//! Lifecycle, tab and window handlers for the dashboard TUI.
//!
//! This module handles startup initialisation, mounting and unmounting of
//! tab views, terminal resize events, and high-level lifecycle messages such
//! as quit and help toggling.

use bubbletea_rs::Cmd;

use super::{DashboardApp, MountedView};
use crate::tui::messages::{AppMsg, FetchOrigin};
use crate::tui::state::{CrawlerViewState, ReviewQueryState};
use crate::tui::tab::Tab;

impl DashboardApp {
    /// Dispatches lifecycle and window messages to their handlers.
    pub(super) fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Initialized => self.handle_initialized(),
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => {
                self.width = *width;
                self.height = *height;
                None
            }
            _ => {
                // Unreachable: caller filters to lifecycle messages.
                None
            }
        }
    }

    /// Handles the synthetic startup message by mounting the start tab.
    ///
    /// `Initialized` is a one-shot event; repeats are ignored so the start
    /// view is not remounted.
    fn handle_initialized(&mut self) -> Option<Cmd> {
        if self.has_initialized {
            return None;
        }

        self.has_initialized = true;
        self.mount(self.start_tab)
    }

    /// Switches to `tab`, unmounting the current view first.
    pub(super) fn handle_switch_tab(&mut self, tab: Tab) -> Option<Cmd> {
        if tab == self.active_tab && !matches!(self.view, MountedView::None) {
            return None;
        }
        self.mount(tab)
    }

    /// Replaces the mounted view with a fresh one for `tab`.
    ///
    /// Dropping the previous state ends its poll loop: the next tick or
    /// response it produces carries a session that no longer matches.
    fn mount(&mut self, tab: Tab) -> Option<Cmd> {
        let session = self.next_session;
        self.next_session = session.next();
        self.active_tab = tab;
        tracing::debug!(tab = tab.label(), "mounting view");

        match tab {
            Tab::Reviews => {
                self.view = MountedView::Reviews(ReviewQueryState::new(session));
                self.request_review_view()
            }
            Tab::Crawler => {
                self.view = MountedView::Crawler(CrawlerViewState::new(session));
                self.request_status(FetchOrigin::Scheduled)
            }
        }
    }
}
