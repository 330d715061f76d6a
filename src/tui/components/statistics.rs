//! Statistics panel embedded in the review list view.
//!
//! Renders headline metrics, the content-status breakdown and the per-topic
//! distribution from a derived [`StatsSummary`]. Renders nothing when no
//! summary is available.

use crate::tui::state::{StatsSummary, proportional_cells};

use super::text::{render_bar, truncate_to_width};

/// Widest bar drawn, in cells.
const MAX_BAR_WIDTH: usize = 30;
/// Width reserved for bar labels.
const LABEL_WIDTH: usize = 14;
/// Topic bars shown at most; the remainder is summarised.
const MAX_TOPIC_ROWS: usize = 8;

/// Context for rendering the statistics panel.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsViewContext<'a> {
    /// Derived figures, if stats are known.
    pub summary: Option<&'a StatsSummary>,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Renders the statistics panel as a string.
#[must_use]
pub fn render_statistics(ctx: &StatisticsViewContext<'_>) -> String {
    let Some(summary) = ctx.summary else {
        return String::new();
    };

    let mut output = format!(
        "Total reviews: {}   Success rate: {}%   Topics: {}\n",
        summary.total_reviews, summary.success_rate_percent, summary.topic_count
    );

    let bar_width = ctx
        .max_width
        .saturating_sub(LABEL_WIDTH + 8)
        .min(MAX_BAR_WIDTH);

    let slice_total: u64 = summary.slices.iter().map(|slice| slice.count).sum();
    for slice in &summary.slices {
        let cells =
            proportional_cells(slice.count, slice_total.saturating_sub(slice.count), bar_width);
        output.push_str(&bar_row(slice.kind.label(), slice.count, cells));
    }

    let max_topic = summary
        .topic_bars
        .first()
        .map_or(0, |bar| bar.count);
    for bar in summary.topic_bars.iter().take(MAX_TOPIC_ROWS) {
        let cells = proportional_cells(bar.count, max_topic.saturating_sub(bar.count), bar_width);
        output.push_str(&bar_row(&bar.topic, bar.count, cells));
    }
    let hidden = summary.topic_bars.len().saturating_sub(MAX_TOPIC_ROWS);
    if hidden > 0 {
        output.push_str(&format!("  ... and {hidden} more topics\n"));
    }

    output
}

fn bar_row(name: &str, count: u64, cells: usize) -> String {
    let label = truncate_to_width(name, LABEL_WIDTH);
    format!(
        "  {label:<width$} {count:>5} {}\n",
        render_bar(cells, 0),
        width = LABEL_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{StatisticsViewContext, render_statistics};
    use crate::api::models::test_support::stats_with_counts;
    use crate::tui::state::StatsSummary;

    #[rstest]
    fn renders_nothing_without_summary() {
        let ctx = StatisticsViewContext {
            summary: None,
            max_width: 80,
        };

        assert!(render_statistics(&ctx).is_empty());
    }

    #[rstest]
    fn renders_metrics_and_slices() {
        let summary = StatsSummary::derive(Some(&stats_with_counts(42, 2, 0)));
        let ctx = StatisticsViewContext {
            summary: summary.as_ref(),
            max_width: 80,
        };

        let output = render_statistics(&ctx);

        assert!(output.contains("Total reviews: 42"));
        assert!(output.contains("Success rate: 95%"));
        assert!(output.contains("Completed"));
        assert!(output.contains("Failed"));
        assert!(!output.contains("Pending"), "zero slice should be hidden");
        assert!(output.contains("Cardiology"));
    }
}
