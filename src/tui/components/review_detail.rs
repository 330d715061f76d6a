//! Detail modal for a single review.
//!
//! Built entirely from list fields; opening it never touches the network.

use crate::api::models::Review;

use super::text::wrap_words;

const NO_CONTENT_PLACEHOLDER: &str = "No content available";

/// Context for rendering the review detail modal.
#[derive(Debug, Clone, Copy)]
pub struct ReviewDetailViewContext<'a> {
    /// Review to display.
    pub review: &'a Review,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Renders the detail modal.
#[must_use]
pub fn render_review_detail(ctx: &ReviewDetailViewContext<'_>) -> String {
    let review = ctx.review;
    let width = ctx.max_width.max(20);
    let mut output = String::new();

    output.push_str(&"\u{2500}".repeat(width));
    output.push('\n');
    for line in wrap_words(review.display_title(), width) {
        output.push_str(&line);
        output.push('\n');
    }
    output.push('\n');

    field(&mut output, "Authors", review.authors.as_deref().unwrap_or("Unknown"));
    let published = review
        .publication_date
        .map_or_else(|| "Unknown".to_owned(), |date| date.to_string());
    field(&mut output, "Published", &published);
    field(&mut output, "URL", review.url.as_deref().unwrap_or("-"));
    field(&mut output, "Status", review.crawl_status.label());
    output.push('\n');

    let content = review
        .content
        .as_deref()
        .filter(|content| !content.trim().is_empty())
        .unwrap_or(NO_CONTENT_PLACEHOLDER);
    for line in wrap_words(content, width) {
        output.push_str(&line);
        output.push('\n');
    }

    output.push_str(&"\u{2500}".repeat(width));
    output.push('\n');
    output.push_str("Esc: close\n");
    output
}

fn field(output: &mut String, label: &str, value: &str) {
    output.push_str(label);
    output.push_str(": ");
    output.push_str(value);
    output.push('\n');
}
