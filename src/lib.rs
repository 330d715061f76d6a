//! Crawldash library crate providing a terminal dashboard for a review
//! crawler backend.
//!
//! The library wraps reqwest to talk to the crawler's REST API, keeps the
//! per-view state machines for the review list and the live crawler status,
//! and renders both through a bubbletea-rs terminal interface. Errors are
//! surfaced as [`DashboardError`] values that the CLI can display.

pub mod api;
pub mod config;
pub mod telemetry;
pub mod tui;

pub use api::{
    ApiSettings, CrawlStatus, CrawlerAction, CrawlerStatus, CrawlerStatusUpdate, DashboardError,
    DashboardGateway, HttpDashboardGateway, Nullable, REVIEW_PAGE_SIZE, RetryOutcome, Review,
    ReviewPage, ReviewQuery, ReviewStats,
};
pub use config::{DashboardConfig, DashboardSettings, OperationMode};
pub use tui::state::{StatsSummary, success_rate_percent};
