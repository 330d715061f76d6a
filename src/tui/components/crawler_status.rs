//! Crawler status panel.
//!
//! Renders the live status line, counters, the success/failure proportion
//! bar, the newest-first list of processed reviews (status, authors, topic,
//! date and link) with `[NEW]` markers and the error log.

use chrono::NaiveDateTime;

use crate::api::models::{CrawlerAction, CrawlerStatus, Review};
use crate::tui::state::{CrawlerPhase, CrawlerViewState, proportional_cells};

use super::text::{render_bar, truncate_to_width};

/// Widest proportion bar drawn, in cells.
const MAX_PROPORTION_WIDTH: usize = 40;

/// Context for rendering the crawler status panel.
#[derive(Debug, Clone, Copy)]
pub struct CrawlerStatusViewContext<'a> {
    /// Crawler view state.
    pub state: &'a CrawlerViewState,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Renders the crawler status panel as a string.
#[must_use]
pub fn render_crawler_status(ctx: &CrawlerStatusViewContext<'_>) -> String {
    let state = ctx.state;
    let mut output = String::new();

    if let Some(banner) = state.banner() {
        output.push_str(&format!("! {banner}\n\n"));
    }

    let Some(status) = state.status() else {
        output.push_str(match state.phase() {
            CrawlerPhase::Error => "Crawler status unavailable. Press r to retry.\n",
            _ => "Loading crawler status...\n",
        });
        return output;
    };

    output.push_str(&status_line(state, status));
    output.push_str(&format!(
        "Current topic: {}\n",
        non_empty_or(&status.current_topic, "None")
    ));
    if status.running {
        if let Some(review) = status.current_review.as_deref() {
            output.push_str(&format!(
                "Current review: {}\n",
                truncate_to_width(review, ctx.max_width.saturating_sub(16))
            ));
        }
    }
    if !status.processed_topics.trim().is_empty() {
        output.push_str(&format!("Processed topics: {}\n", status.processed_topics));
    }
    output.push('\n');

    output.push_str(&format!(
        "Total {}   Rev/min {:.1}   Success {}   Failed {}\n",
        status.total_processed,
        status.crawling_speed,
        status.successful_reviews,
        status.failed_reviews
    ));
    output.push_str(&proportion_line(status, ctx.max_width));
    output.push('\n');

    let reviews: Vec<&Review> = state.reviews_newest_first().collect();
    output.push_str(&format!("Newly processed reviews ({}):\n", reviews.len()));
    for review in &reviews {
        let marker = if state.is_new(review) { "[NEW] " } else { "" };
        let line = format!("  {marker}{}", review_details(review));
        output.push_str(&truncate_to_width(&line, ctx.max_width));
        output.push('\n');
        if let Some(url) = review.url.as_deref() {
            output.push_str(&truncate_to_width(
                &format!("      {url}"),
                ctx.max_width,
            ));
            output.push('\n');
        }
    }
    if reviews.is_empty() {
        output.push_str("  None yet\n");
    }
    output.push('\n');

    if let Some(last_run) = status.last_run {
        output.push_str(&format!("Last run: {}\n", format_timestamp(last_run)));
    }
    if let Some(updated) = state.last_updated() {
        output.push_str(&format!("Last update: {}\n", updated.format("%H:%M:%S")));
    }

    let errors = status.error_lines();
    if !errors.is_empty() {
        output.push_str("\nError log:\n");
        for line in errors {
            output.push_str("  ");
            output.push_str(&truncate_to_width(line, ctx.max_width.saturating_sub(2)));
            output.push('\n');
        }
    }

    output
}

/// Title first so the `[NEW]` marker reads against it.
fn review_details(review: &Review) -> String {
    let status = review.crawl_status.label();
    let topic = review.topic.as_deref().unwrap_or("no topic");
    let date = review
        .publication_date
        .map_or_else(String::new, |date| format!(", {date}"));
    let authors = review
        .authors
        .as_deref()
        .map_or_else(String::new, |authors| format!(" - {authors}"));

    format!(
        "{} [{status}]{authors} ({topic}{date})",
        review.display_title()
    )
}

fn status_line(state: &CrawlerViewState, status: &CrawlerStatus) -> String {
    let label = if status.running { "Running" } else { "Stopped" };
    let action = match state.pending_action() {
        Some(CrawlerAction::Start) => "  (starting...)".to_owned(),
        Some(CrawlerAction::Stop) => "  (stopping...)".to_owned(),
        None => {
            let verb = if status.running { "Stop" } else { "Start" };
            format!("  [s: {verb} crawler]")
        }
    };
    format!("Status: {label}{action}\n")
}

fn proportion_line(status: &CrawlerStatus, max_width: usize) -> String {
    let width = max_width.saturating_sub(2).min(MAX_PROPORTION_WIDTH);
    let succeeded = status.successful_reviews;
    let failed = status.failed_reviews;
    if succeeded == 0 && failed == 0 {
        return format!("[{}]\n", " ".repeat(width));
    }
    let filled = proportional_cells(succeeded, failed, width);
    format!(
        "[{}]\n",
        render_bar(filled, width.saturating_sub(filled))
    )
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}
