//! Gateways for talking to the crawler backend.
//!
//! The trait keeps the TUI independent of HTTP so handlers can be tested with
//! mocks, while [`HttpDashboardGateway`] performs real requests with reqwest.

mod client;
mod error_mapping;
mod http_utils;

pub use client::{ApiSettings, HttpDashboardGateway};

use async_trait::async_trait;

use crate::api::error::DashboardError;
use crate::api::models::{
    CrawlerAction, CrawlerStatusUpdate, ReviewPage, ReviewStats, RetryOutcome,
};
use crate::api::query::ReviewQuery;

/// Gateway exposing every backend call the dashboard makes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardGateway: Send + Sync {
    /// Fetch the current crawler status.
    async fn crawler_status(&self) -> Result<CrawlerStatusUpdate, DashboardError>;

    /// Start or stop the crawler, returning the resulting status.
    async fn control_crawler(
        &self,
        action: CrawlerAction,
    ) -> Result<CrawlerStatusUpdate, DashboardError>;

    /// Fetch one page of reviews matching the query.
    async fn list_reviews(&self, query: &ReviewQuery) -> Result<ReviewPage, DashboardError>;

    /// Fetch the distinct topic list.
    async fn list_topics(&self) -> Result<Vec<String>, DashboardError>;

    /// Fetch aggregate review counts.
    async fn review_stats(&self) -> Result<ReviewStats, DashboardError>;

    /// Re-queue every review whose content fetch failed.
    async fn retry_failed(&self) -> Result<RetryOutcome, DashboardError>;
}
