//! Test helpers for constructing review and status fixtures.
//!
//! # Examples
//!
//! ```
//! use crawldash::api::models::test_support::{review_titled, status_with_reviews};
//!
//! let status = status_with_reviews(true, vec![review_titled("A")]);
//! assert!(status.running);
//! assert_eq!(status.new_reviews.len(), 1);
//! ```

use super::{CrawlStatus, CrawlerStatus, CrawlerStatusUpdate, Review, ReviewStats};

/// Constructs a review with only a title set.
#[must_use]
pub fn review_titled(title: &str) -> Review {
    Review {
        title: Some(title.to_owned()),
        ..Default::default()
    }
}

/// Constructs a review with an identifier, title and topic.
#[must_use]
pub fn review_with_id(id: u64, title: &str, topic: &str) -> Review {
    Review {
        id: Some(id),
        title: Some(title.to_owned()),
        topic: Some(topic.to_owned()),
        authors: Some("Smith J, Doe A".to_owned()),
        url: Some(format!("https://reviews.example.org/{id}")),
        crawl_status: CrawlStatus::Completed,
        ..Default::default()
    }
}

/// Constructs a held status with the given running flag and recent reviews.
#[must_use]
pub fn status_with_reviews(running: bool, new_reviews: Vec<Review>) -> CrawlerStatus {
    CrawlerStatus {
        running,
        new_reviews,
        ..Default::default()
    }
}

/// Constructs a status payload with the given running flag and recent reviews.
#[must_use]
pub fn status_update(running: bool, new_reviews: Vec<Review>) -> CrawlerStatusUpdate {
    CrawlerStatusUpdate {
        running: Some(running),
        new_reviews: Some(new_reviews),
        ..Default::default()
    }
}

/// Constructs stats with the given totals and a single-topic distribution.
#[must_use]
pub fn stats_with_counts(total: u64, failed: u64, pending: u64) -> ReviewStats {
    ReviewStats {
        total_reviews: total,
        failed_content: failed,
        pending_content: pending,
        reviews_by_topic: Some([("Cardiology".to_owned(), total)].into_iter().collect()),
    }
}
