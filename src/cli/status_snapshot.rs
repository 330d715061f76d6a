//! One-shot crawler status summary.
//!
//! Fetches the crawler status and the aggregate review statistics once and
//! prints a plain-text summary, for scripts and quick checks without the TUI.

use std::io::{self, Write};
use std::time::Instant;

use crawldash::telemetry::{StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
use crawldash::{
    CrawlerStatus, DashboardError, DashboardGateway, DashboardSettings, HttpDashboardGateway,
    ReviewStats, success_rate_percent,
};

/// Fetches a snapshot and writes the summary to stdout.
///
/// # Errors
///
/// Returns an error when the crawler status cannot be fetched or stdout
/// cannot be written. Missing statistics are reported in the summary rather
/// than failing the command.
pub async fn run(settings: &DashboardSettings) -> Result<(), DashboardError> {
    let gateway = HttpDashboardGateway::new(settings.api.clone())?;
    let telemetry = StderrJsonlTelemetrySink;
    let (status, stats) = fetch_snapshot(&gateway, &telemetry).await?;

    let mut stdout = io::stdout().lock();
    write_snapshot_to(&mut stdout, &status, stats.as_ref())
}

/// Fetches the crawler status and, best effort, the review statistics.
///
/// # Errors
///
/// Returns the gateway error when the status request fails.
pub async fn fetch_snapshot(
    gateway: &dyn DashboardGateway,
    telemetry: &dyn TelemetrySink,
) -> Result<(CrawlerStatus, Option<ReviewStats>), DashboardError> {
    let start = Instant::now();
    let status = CrawlerStatus::from_update(gateway.crawler_status().await?);
    telemetry.record(TelemetryEvent::StatusPollRecorded {
        latency_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        running: status.running,
        new_review_count: status.new_reviews.len(),
    });

    let stats = match gateway.review_stats().await {
        Ok(stats) => Some(stats),
        Err(error) => {
            tracing::warn!(%error, "failed to fetch review statistics");
            None
        }
    };

    Ok((status, stats))
}

/// Writes the snapshot summary to the given writer.
///
/// # Errors
///
/// Returns [`DashboardError::Io`] when writing fails.
pub fn write_snapshot_to<W: Write>(
    writer: &mut W,
    status: &CrawlerStatus,
    stats: Option<&ReviewStats>,
) -> Result<(), DashboardError> {
    let message = format_snapshot(status, stats);
    write!(writer, "{message}").map_err(|error| DashboardError::Io {
        message: error.to_string(),
    })
}

fn format_snapshot(status: &CrawlerStatus, stats: Option<&ReviewStats>) -> String {
    let state = if status.running { "Running" } else { "Stopped" };
    let topic = if status.current_topic.is_empty() {
        "None"
    } else {
        status.current_topic.as_str()
    };
    let last_run = status.last_run.map_or_else(
        || "never".to_owned(),
        |timestamp| timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
    );

    let mut lines = vec![
        format!("Crawler: {state}"),
        format!("Current topic: {topic}"),
        format!(
            "Processed: {} (success {}, failed {})",
            status.total_processed, status.successful_reviews, status.failed_reviews
        ),
        format!("Speed: {:.1} reviews/min", status.crawling_speed),
        format!("New reviews: {}", status.new_reviews.len()),
        format!("Last run: {last_run}"),
    ];
    lines.push(stats.map_or_else(
        || "Reviews: statistics unavailable".to_owned(),
        |counts| {
            format!(
                "Reviews: {} total, {} failed, {} pending, {}% success",
                counts.total_reviews,
                counts.failed_content,
                counts.pending_content,
                success_rate_percent(counts.total_reviews, counts.failed_content)
            )
        },
    ));
    lines.extend(
        status
            .error_lines()
            .into_iter()
            .map(|line| format!("Error: {line}")),
    );

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
