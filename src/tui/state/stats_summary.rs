//! Pure derivations behind the statistics panel.
//!
//! [`StatsSummary::derive`] turns the backend's aggregate counts into the
//! figures the panel renders: topic bars, a status breakdown and headline
//! metrics. Nothing here performs I/O.

use crate::api::models::ReviewStats;

/// One bar of the per-topic distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicBar {
    /// Topic name.
    pub topic: String,
    /// Number of reviews under this topic.
    pub count: u64,
}

/// Category of the content-status breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceKind {
    /// Content fetched.
    Completed,
    /// Content fetch failed.
    Failed,
    /// Content not fetched yet.
    Pending,
}

impl SliceKind {
    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Pending => "Pending",
        }
    }
}

/// One non-empty slice of the content-status breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSlice {
    /// Slice category.
    pub kind: SliceKind,
    /// Number of reviews in this category.
    pub count: u64,
}

/// Figures rendered by the statistics panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    /// Topic bars, largest first; ties ordered by topic name.
    pub topic_bars: Vec<TopicBar>,
    /// Non-empty status slices in Completed, Failed, Pending order.
    pub slices: Vec<StatusSlice>,
    /// Total number of reviews.
    pub total_reviews: u64,
    /// Share of reviews whose content did not fail, as a rounded percentage.
    pub success_rate_percent: u64,
    /// Number of distinct topics.
    pub topic_count: usize,
}

impl StatsSummary {
    /// Derives the panel figures from optional stats.
    ///
    /// Returns `None` when the stats are unknown or carry no per-topic map,
    /// in which case the panel renders nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawldash::ReviewStats;
    /// use crawldash::tui::state::StatsSummary;
    ///
    /// let stats = ReviewStats {
    ///     total_reviews: 42,
    ///     failed_content: 2,
    ///     pending_content: 0,
    ///     reviews_by_topic: Some([("Cardiology".to_owned(), 42)].into_iter().collect()),
    /// };
    /// let summary = StatsSummary::derive(Some(&stats)).expect("stats carry a topic map");
    /// assert_eq!(summary.success_rate_percent, 95);
    /// ```
    #[must_use]
    pub fn derive(maybe_stats: Option<&ReviewStats>) -> Option<Self> {
        let stats = maybe_stats?;
        let by_topic = stats.reviews_by_topic.as_ref()?;

        let mut topic_bars: Vec<TopicBar> = by_topic
            .iter()
            .map(|(topic, count)| TopicBar {
                topic: topic.clone(),
                count: *count,
            })
            .collect();
        topic_bars.sort_by(|left, right| {
            right
                .count
                .cmp(&left.count)
                .then_with(|| left.topic.cmp(&right.topic))
        });

        Some(Self {
            topic_count: topic_bars.len(),
            topic_bars,
            slices: status_slices(stats),
            total_reviews: stats.total_reviews,
            success_rate_percent: success_rate_percent(stats.total_reviews, stats.failed_content),
        })
    }
}

fn status_slices(stats: &ReviewStats) -> Vec<StatusSlice> {
    let completed = stats
        .total_reviews
        .saturating_sub(stats.failed_content)
        .saturating_sub(stats.pending_content);

    [
        (SliceKind::Completed, completed),
        (SliceKind::Failed, stats.failed_content),
        (SliceKind::Pending, stats.pending_content),
    ]
    .into_iter()
    .filter(|(_, count)| *count > 0)
    .map(|(kind, count)| StatusSlice { kind, count })
    .collect()
}

/// Returns `round((total - failed) / total * 100)`, or 0 when `total` is 0.
///
/// Halves round up, matching conventional rounding of the percentage.
#[must_use]
#[expect(
    clippy::integer_division,
    reason = "Rounded integer percentage is computed exactly without floats"
)]
pub fn success_rate_percent(total: u64, failed: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let succeeded = u128::from(total.saturating_sub(failed));
    let total_wide = u128::from(total);
    let rounded = (succeeded * 200 + total_wide) / (total_wide * 2);
    u64::try_from(rounded).unwrap_or(100)
}

/// Splits `width` cells between two counts in proportion.
///
/// Returns the number of cells for `left`; the remainder belongs to `right`.
/// Returns 0 when both counts are zero.
#[must_use]
#[expect(
    clippy::integer_division,
    reason = "Cell counts are whole numbers; truncation is intended"
)]
pub fn proportional_cells(left: u64, right: u64, width: usize) -> usize {
    let total = u128::from(left) + u128::from(right);
    if total == 0 {
        return 0;
    }
    let cells = u128::from(left) * width as u128 / total;
    usize::try_from(cells).unwrap_or(width)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;

    use super::{SliceKind, StatsSummary, proportional_cells, success_rate_percent};
    use crate::api::models::ReviewStats;
    use crate::api::models::test_support::stats_with_counts;

    #[rstest]
    #[case::all_ok(10, 0, 100)]
    #[case::forty_of_forty_two(42, 2, 95)]
    #[case::half_rounds_up(8, 1, 88)]
    #[case::two_thirds(3, 1, 67)]
    #[case::one_third(3, 2, 33)]
    #[case::all_failed(5, 5, 0)]
    #[case::empty(0, 0, 0)]
    #[case::failed_exceeds_total(2, 5, 0)]
    fn success_rate_rounds(#[case] total: u64, #[case] failed: u64, #[case] expected: u64) {
        assert_eq!(success_rate_percent(total, failed), expected);
    }

    #[rstest]
    fn absent_stats_render_nothing() {
        assert_eq!(StatsSummary::derive(None), None);
    }

    #[rstest]
    fn absent_topic_map_renders_nothing() {
        let stats = ReviewStats {
            total_reviews: 3,
            ..Default::default()
        };
        assert_eq!(StatsSummary::derive(Some(&stats)), None);
    }

    #[rstest]
    fn topic_bars_sort_by_count_then_name() {
        let stats = ReviewStats {
            total_reviews: 9,
            reviews_by_topic: Some(BTreeMap::from([
                ("Oncology".to_owned(), 2),
                ("Cardiology".to_owned(), 5),
                ("Neurology".to_owned(), 2),
            ])),
            ..Default::default()
        };

        let summary = StatsSummary::derive(Some(&stats)).expect("summary");
        let order: Vec<&str> = summary
            .topic_bars
            .iter()
            .map(|bar| bar.topic.as_str())
            .collect();

        assert_eq!(order, vec!["Cardiology", "Neurology", "Oncology"]);
        assert_eq!(summary.topic_count, 3);
    }

    #[rstest]
    fn zero_slices_are_dropped() {
        let summary = StatsSummary::derive(Some(&stats_with_counts(42, 2, 0))).expect("summary");
        let slices: Vec<(SliceKind, u64)> = summary
            .slices
            .iter()
            .map(|slice| (slice.kind, slice.count))
            .collect();

        assert_eq!(slices, vec![(SliceKind::Completed, 40), (SliceKind::Failed, 2)]);
    }

    #[rstest]
    fn completed_slice_saturates() {
        let summary = StatsSummary::derive(Some(&stats_with_counts(3, 2, 4))).expect("summary");
        let kinds: Vec<SliceKind> = summary.slices.iter().map(|slice| slice.kind).collect();

        assert_eq!(kinds, vec![SliceKind::Failed, SliceKind::Pending]);
    }

    #[rstest]
    #[case(40, 2, 20, 19)]
    #[case(0, 0, 20, 0)]
    #[case(1, 0, 20, 20)]
    #[case(0, 5, 20, 0)]
    fn proportional_cells_split_width(
        #[case] left: u64,
        #[case] right: u64,
        #[case] width: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(proportional_cells(left, right, width), expected);
    }
}
