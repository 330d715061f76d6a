//! Message types for the TUI update loop.
//!
//! This module defines all message types that can be sent to the application's
//! update function. Messages represent user actions, async command results,
//! and system events. Results of network requests carry the session and
//! ticket they were issued under so late arrivals can be discarded.

use crate::api::error::DashboardError;
use crate::api::models::{
    CrawlerAction, CrawlerStatusUpdate, ReviewPage, ReviewStats, RetryOutcome,
};

use super::state::{SessionId, Ticket};
use super::tab::Tab;

/// Why a crawler status fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Part of the polling loop; completion re-arms the timer.
    Scheduled,
    /// One-off fetch (after a toggle or a manual refresh).
    Manual,
}

/// Messages for the dashboard TUI application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Navigation
    /// Move cursor up one item.
    CursorUp,
    /// Move cursor down one item.
    CursorDown,
    /// Move to the next review page.
    NextPage,
    /// Move to the previous review page.
    PreviousPage,
    /// Open the detail view for the review under the cursor.
    OpenDetail,
    /// Close the detail view.
    CloseDetail,
    /// Mount the given tab.
    SwitchTab(Tab),
    /// Mount the tab after the active one.
    NextTab,

    // Query changes
    /// Advance the topic filter.
    CycleTopic,
    /// Move the topic filter backwards.
    CycleTopicBack,
    /// Start editing the search term.
    StartSearch,
    /// Append a character to the search term.
    SearchInput(char),
    /// Delete the last character of the search term.
    SearchBackspace,
    /// Stop editing the search term.
    FinishSearch,

    // Crawler
    /// Start or stop the crawler depending on its state.
    ToggleCrawler,
    /// Poll timer fired.
    StatusTick {
        /// Session that armed the timer.
        session: SessionId,
    },
    /// A crawler status fetch finished.
    StatusLoaded {
        /// Session that issued the request.
        session: SessionId,
        /// Ticket of the request.
        ticket: Ticket,
        /// Why the fetch was issued.
        origin: FetchOrigin,
        /// Request latency in milliseconds.
        latency_ms: u64,
        /// Fetched payload or the failure.
        result: Result<CrawlerStatusUpdate, DashboardError>,
    },
    /// A start/stop request finished.
    ToggleCompleted {
        /// Session that issued the request.
        session: SessionId,
        /// Action requested.
        action: CrawlerAction,
        /// Resulting status or the failure.
        result: Result<CrawlerStatusUpdate, DashboardError>,
    },

    // Review data
    /// Re-fetch the data of the active view.
    RefreshRequested,
    /// Re-queue failed reviews.
    RetryFailedRequested,
    /// Topic list fetched.
    TopicsLoaded {
        /// Session that issued the request.
        session: SessionId,
        /// Topics or the failure.
        result: Result<Vec<String>, DashboardError>,
    },
    /// Aggregate stats fetched.
    StatsLoaded {
        /// Session that issued the request.
        session: SessionId,
        /// Stats or the failure.
        result: Result<ReviewStats, DashboardError>,
    },
    /// Review page fetched.
    ReviewPageLoaded {
        /// Session that issued the request.
        session: SessionId,
        /// Ticket of the request.
        ticket: Ticket,
        /// Page or the failure.
        result: Result<ReviewPage, DashboardError>,
    },
    /// Retry request finished.
    RetryCompleted {
        /// Session that issued the request.
        session: SessionId,
        /// Backend outcome or the failure.
        result: Result<RetryOutcome, DashboardError>,
    },
    /// Several results produced by one sequential command.
    Batch(Vec<AppMsg>),

    // Application lifecycle
    /// Synthetic startup event emitted by `init()`.
    Initialized,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for cursor, paging, detail and tab messages.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::CursorUp
                | Self::CursorDown
                | Self::NextPage
                | Self::PreviousPage
                | Self::OpenDetail
                | Self::CloseDetail
                | Self::SwitchTab(_)
                | Self::NextTab
        )
    }

    /// Returns true for topic and search changes.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(
            self,
            Self::CycleTopic
                | Self::CycleTopicBack
                | Self::StartSearch
                | Self::SearchInput(_)
                | Self::SearchBackspace
                | Self::FinishSearch
        )
    }

    /// Returns true for crawler control and polling messages.
    #[must_use]
    pub const fn is_crawler(&self) -> bool {
        matches!(
            self,
            Self::ToggleCrawler
                | Self::StatusTick { .. }
                | Self::StatusLoaded { .. }
                | Self::ToggleCompleted { .. }
        )
    }

    /// Returns true for review data loading messages.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(
            self,
            Self::RefreshRequested
                | Self::RetryFailedRequested
                | Self::TopicsLoaded { .. }
                | Self::StatsLoaded { .. }
                | Self::ReviewPageLoaded { .. }
                | Self::RetryCompleted { .. }
                | Self::Batch(_)
        )
    }
}
