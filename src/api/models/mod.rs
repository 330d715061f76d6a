//! Data models representing crawler status and review records.
//!
//! Payloads are decoded leniently: absent fields fall back to defaults and
//! unparseable timestamps become `None`, so a partially populated response
//! never aborts a refresh.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

mod lenient;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Processing outcome of a single review as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum CrawlStatus {
    /// Discovered but content not fetched yet.
    #[default]
    Pending,
    /// Content is being fetched.
    Running,
    /// Content fetched successfully.
    Completed,
    /// Content fetch failed.
    Failed,
    /// A status value this client does not know about.
    Other(String),
}

impl From<String> for CrawlStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Self::Pending,
            "RUNNING" => Self::Running,
            "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl CrawlStatus {
    /// Returns the label shown in list rows and detail views.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

/// A single crawled review record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Review {
    /// Backend identifier, if the payload carried one.
    pub id: Option<u64>,
    /// Review title.
    pub title: Option<String>,
    /// Author list as a single display string.
    pub authors: Option<String>,
    /// Topic the review was discovered under.
    pub topic: Option<String>,
    /// Publication date (`publicationDate` or legacy `date`).
    #[serde(alias = "date", deserialize_with = "lenient::date")]
    pub publication_date: Option<NaiveDate>,
    /// Source URL of the review.
    pub url: Option<String>,
    /// Crawl outcome for this review.
    pub crawl_status: CrawlStatus,
    /// Full content when the listing endpoint embeds it.
    pub content: Option<String>,
}

/// Identity used when comparing review lists across status snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReviewKey {
    /// Backend identifier.
    Id(u64),
    /// Title, used only when the payload has no identifier.
    Title(String),
}

impl Review {
    /// Returns the identity key: the identifier when present, else the title.
    #[must_use]
    pub fn key(&self) -> ReviewKey {
        self.id.map_or_else(
            || ReviewKey::Title(self.title.clone().unwrap_or_default()),
            ReviewKey::Id,
        )
    }

    /// Returns the title or a placeholder for untitled records.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("Untitled review")
    }
}

/// Crawler status as held by the dashboard.
///
/// Each poll overlays a [`CrawlerStatusUpdate`] onto the held value with
/// [`CrawlerStatus::overlay`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrawlerStatus {
    /// Whether the crawler is currently running.
    pub running: bool,
    /// Time of the last crawler run.
    pub last_run: Option<NaiveDateTime>,
    /// Number of reviews processed in the current run.
    pub total_processed: u64,
    /// Recently processed reviews, most recent last.
    pub new_reviews: Vec<Review>,
    /// Reviews processed per minute.
    pub crawling_speed: f64,
    /// Topic being crawled.
    pub current_topic: String,
    /// Review being crawled, if any.
    pub current_review: Option<String>,
    /// Newline-delimited recent errors.
    pub error_log: String,
    /// Comma-separated list of topics already processed.
    pub processed_topics: String,
    /// Reviews fetched successfully.
    pub successful_reviews: u64,
    /// Reviews whose fetch failed.
    pub failed_reviews: u64,
}

/// A status field that tells an omitted key apart from an explicit `null`.
///
/// The backend resets its run statistics on every start and reports the
/// cleared fields as `null`; those must reset the held value rather than
/// keep the previous run's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullable<T> {
    /// Key not present; the held value is kept.
    Absent,
    /// Key present with `null`; the held value is reset.
    Null,
    /// Key present with a value.
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from_present)
    }
}

impl<T> Nullable<T> {
    /// Classifies a key that was present in the payload.
    #[must_use]
    pub fn from_present(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }

    /// Returns the carried value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    /// Writes the field onto `slot`; `null` resets it to its default.
    pub fn apply_to(self, slot: &mut T)
    where
        T: Default,
    {
        match self {
            Self::Absent => {}
            Self::Null => *slot = T::default(),
            Self::Value(value) => *slot = value,
        }
    }

    /// Writes the field onto an optional slot; `null` clears it.
    pub fn apply_to_option(self, slot: &mut Option<T>) {
        match self {
            Self::Absent => {}
            Self::Null => *slot = None,
            Self::Value(value) => *slot = Some(value),
        }
    }
}

/// Wire shape of `/crawler/status`, `/crawler/start` and `/crawler/stop`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrawlerStatusUpdate {
    /// Whether the crawler is running.
    pub running: Option<bool>,
    /// Time of the last crawler run.
    #[serde(deserialize_with = "lenient::nullable_timestamp")]
    pub last_run: Nullable<NaiveDateTime>,
    /// Number of reviews processed.
    pub total_processed: Nullable<u64>,
    /// Recently processed reviews.
    pub new_reviews: Option<Vec<Review>>,
    /// Reviews processed per minute.
    pub crawling_speed: Nullable<f64>,
    /// Topic being crawled.
    pub current_topic: Nullable<String>,
    /// Review being crawled.
    pub current_review: Nullable<String>,
    /// Newline-delimited recent errors.
    pub error_log: Nullable<String>,
    /// Comma-separated processed topics.
    pub processed_topics: Nullable<String>,
    /// Reviews fetched successfully.
    pub successful_reviews: Nullable<u64>,
    /// Reviews whose fetch failed.
    pub failed_reviews: Nullable<u64>,
}

impl CrawlerStatus {
    /// Builds a held status from a single payload.
    #[must_use]
    pub fn from_update(update: CrawlerStatusUpdate) -> Self {
        let mut status = Self::default();
        status.overlay(update);
        status
    }

    /// Shallow-overlays a payload onto the held status.
    ///
    /// Fields absent from the payload keep their previous value and fields
    /// sent as `null` are reset, except `running` (absent means stopped) and
    /// `new_reviews` (absent means empty).
    pub fn overlay(&mut self, update: CrawlerStatusUpdate) {
        let CrawlerStatusUpdate {
            running,
            last_run,
            total_processed,
            new_reviews,
            crawling_speed,
            current_topic,
            current_review,
            error_log,
            processed_topics,
            successful_reviews,
            failed_reviews,
        } = update;

        self.running = running.unwrap_or(false);
        self.new_reviews = new_reviews.unwrap_or_default();
        last_run.apply_to_option(&mut self.last_run);
        total_processed.apply_to(&mut self.total_processed);
        crawling_speed.apply_to(&mut self.crawling_speed);
        current_topic.apply_to(&mut self.current_topic);
        current_review.apply_to_option(&mut self.current_review);
        error_log.apply_to(&mut self.error_log);
        processed_topics.apply_to(&mut self.processed_topics);
        successful_reviews.apply_to(&mut self.successful_reviews);
        failed_reviews.apply_to(&mut self.failed_reviews);
    }

    /// Returns the non-empty lines of the error log.
    #[must_use]
    pub fn error_lines(&self) -> Vec<&str> {
        self.error_log
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// Crawler control action issued by the start/stop toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlerAction {
    /// Start a crawl.
    Start,
    /// Stop the running crawl.
    Stop,
}

impl CrawlerAction {
    /// Returns the action that toggles a crawler in the given running state.
    #[must_use]
    pub const fn toggling(running: bool) -> Self {
        if running { Self::Stop } else { Self::Start }
    }

    /// Returns the lowercase verb used in endpoint paths and messages.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

/// Aggregate counts returned by `/reviews/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewStats {
    /// Total number of stored reviews.
    pub total_reviews: u64,
    /// Reviews whose content fetch failed.
    pub failed_content: u64,
    /// Reviews whose content has not been fetched yet.
    pub pending_content: u64,
    /// Review count per topic.
    pub reviews_by_topic: Option<BTreeMap<String, u64>>,
}

/// One page of the review listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewPage {
    /// Reviews on this page.
    pub content: Vec<Review>,
    /// Total number of pages for the current filter.
    pub total_pages: u32,
    /// Total number of matching reviews, when reported.
    pub total_elements: Option<u64>,
}

/// Response body of `/reviews/retry-failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryOutcome {
    /// Number of reviews re-queued.
    pub retried_count: Option<u64>,
    /// Number of failed reviews found.
    pub total_failed: Option<u64>,
}
