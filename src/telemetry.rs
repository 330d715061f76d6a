//! Application telemetry events and sinks.
//!
//! The dashboard is a local tool, but it still benefits from lightweight
//! telemetry to support debugging and to capture operational signals such as
//! poll latency and discarded out-of-order responses.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A crawler status poll completed and its snapshot was applied.
    StatusPollRecorded {
        /// Wall-clock latency of the request in milliseconds.
        latency_ms: u64,
        /// Whether the crawler reported itself as running.
        running: bool,
        /// Number of reviews highlighted as new by this snapshot.
        new_review_count: usize,
    },
    /// A response arrived after a newer request was issued and was dropped.
    StaleResponseDiscarded {
        /// Resource the response belonged to (e.g. `crawler_status`).
        resource: String,
    },
    /// A start/stop request completed.
    CrawlerToggled {
        /// Action requested (`start` or `stop`).
        action: String,
        /// Whether the backend accepted the request.
        succeeded: bool,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// Only suitable outside the interactive dashboard, where stderr output
/// would corrupt the terminal UI.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Forwards telemetry events to the installed `tracing` subscriber.
///
/// Events are emitted at debug level under the `crawldash::telemetry`
/// target, so they land in the dashboard log file when one is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        match serde_json::to_string(&event) {
            Ok(serialised) => {
                tracing::debug!(target: "crawldash::telemetry", event = %serialised);
            }
            Err(error) => {
                tracing::warn!(target: "crawldash::telemetry", %error, "failed to serialise telemetry event");
            }
        }
    }
}

/// Test helpers for asserting on telemetry.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::{Arc, Mutex};

    use super::{TelemetryEvent, TelemetrySink};

    /// Telemetry sink that keeps every recorded event in memory.
    ///
    /// Clones share the same buffer, so one handle can be installed in the
    /// application while the test keeps another for assertions.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingTelemetrySink {
        events: Arc<Mutex<Vec<TelemetryEvent>>>,
    }

    impl RecordingTelemetrySink {
        /// Returns a copy of all events recorded so far.
        #[must_use]
        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|events| events.clone())
                .unwrap_or_default()
        }

        /// Drains and returns all events recorded so far.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|mut events| events.drain(..).collect())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, event: TelemetryEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingTelemetrySink;
    use super::{TelemetryEvent, TelemetrySink, TracingTelemetrySink};

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingTelemetrySink::default();
        sink.record(TelemetryEvent::StaleResponseDiscarded {
            resource: "crawler_status".to_owned(),
        });

        assert_eq!(
            sink.take(),
            vec![TelemetryEvent::StaleResponseDiscarded {
                resource: "crawler_status".to_owned(),
            }]
        );
        assert!(sink.events().is_empty(), "take should drain the buffer");
    }

    #[test]
    fn recording_sink_clones_share_buffer() {
        let sink = RecordingTelemetrySink::default();
        let handle = sink.clone();
        handle.record(TelemetryEvent::CrawlerToggled {
            action: "start".to_owned(),
            succeeded: true,
        });

        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn events_serialise_with_snake_case_tag() {
        let event = TelemetryEvent::StatusPollRecorded {
            latency_ms: 12,
            running: true,
            new_review_count: 2,
        };

        let json = serde_json::to_value(&event).expect("event should serialise");

        assert_eq!(json["type"], "status_poll_recorded");
        assert_eq!(json["new_review_count"], 2);
    }

    #[test]
    fn tracing_sink_accepts_events_without_subscriber() {
        TracingTelemetrySink.record(TelemetryEvent::CrawlerToggled {
            action: "stop".to_owned(),
            succeeded: false,
        });
    }
}
