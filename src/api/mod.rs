//! Client-side access to the crawler backend.
//!
//! The backend exposes a small REST surface for crawler control and review
//! queries. This module owns the typed payloads, the query builder for the
//! paginated review listing, and a trait-based gateway so the TUI can be
//! exercised against mocks.

pub mod error;
pub mod gateway;
pub mod models;
pub mod query;

pub use error::DashboardError;
pub use gateway::{ApiSettings, DashboardGateway, HttpDashboardGateway};
pub use models::{
    CrawlStatus, CrawlerAction, CrawlerStatus, CrawlerStatusUpdate, Nullable, RetryOutcome, Review,
    ReviewPage, ReviewStats,
};
pub use query::{REVIEW_PAGE_SIZE, ReviewQuery};
