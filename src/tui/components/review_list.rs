//! Review list component for displaying one page of reviews.
//!
//! Renders the active filters, pagination, the retry control and a cursor
//! highlighted list of reviews.

use crate::api::models::Review;
use crate::tui::state::ReviewQueryState;

use super::text::truncate_to_width;

/// Context for rendering the review list view.
#[derive(Debug, Clone, Copy)]
pub struct ReviewListViewContext<'a> {
    /// Review list state.
    pub state: &'a ReviewQueryState,
    /// Maximum visible rows for reviews.
    pub visible_height: usize,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Renders the filter bar: topic, search term and pagination.
#[must_use]
pub fn render_filter_bar(state: &ReviewQueryState) -> String {
    let topic = state.query().topic().unwrap_or("All");
    let cursor = if state.is_editing_search() { "_" } else { "" };
    let search = state.search_input();
    let mut line = format!("Topic: {topic}   Search: \"{search}{cursor}\"");

    let total_pages = state.total_pages();
    if total_pages > 0 {
        line.push_str(&format!(
            "   Page {} of {total_pages}",
            state.query().page()
        ));
    }
    if let Some(total) = state.total_elements() {
        line.push_str(&format!(" ({total} reviews)"));
    }
    line.push('\n');
    line
}

/// Renders the retry control line.
#[must_use]
pub fn render_retry_control(state: &ReviewQueryState) -> String {
    if state.is_retrying() {
        return "Retrying failed reviews...\n".to_owned();
    }
    state.retry_label().map_or_else(
        || "Retry Failed (unavailable)\n".to_owned(),
        |label| format!("R: {label}\n"),
    )
}

/// Renders the review rows with the cursor marker.
#[must_use]
pub fn render_review_list(ctx: &ReviewListViewContext<'_>) -> String {
    let state = ctx.state;
    if let Some(banner) = state.banner() {
        return format!("  {banner}\n");
    }
    if state.is_loading() && state.reviews().is_empty() {
        return "  Loading reviews...\n".to_owned();
    }
    if state.reviews().is_empty() {
        return "  No reviews match the current filters.\n".to_owned();
    }

    let visible = ctx.visible_height.max(1);
    let start = state.cursor().saturating_sub(visible.saturating_sub(1));
    let mut output = String::new();
    for (index, review) in state.reviews().iter().enumerate().skip(start).take(visible) {
        let prefix = if index == state.cursor() { ">" } else { " " };
        let line = format_review_line(review, prefix);
        output.push_str(&truncate_to_width(&line, ctx.max_width));
        output.push('\n');
    }
    output
}

fn format_review_line(review: &Review, prefix: &str) -> String {
    let status = review.crawl_status.label();
    let title = review.display_title();
    let topic = review.topic.as_deref().unwrap_or("no topic");
    let date = review
        .publication_date
        .map_or_else(String::new, |date| format!(", {date}"));
    let authors = review
        .authors
        .as_deref()
        .map_or_else(String::new, |authors| format!(" - {authors}"));

    format!("{prefix} [{status}] {title}{authors} ({topic}{date})")
}
