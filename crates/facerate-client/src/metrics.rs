//! Scoring request metrics.
//!
//! Counters and histograms are emitted through the `metrics` facade; the
//! embedding application decides whether an exporter is installed.

use std::time::Duration;

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total scoring requests by outcome.
    pub const REQUESTS_TOTAL: &str = "facerate_requests_total";

    /// Request latency in seconds by outcome.
    pub const LATENCY_SECONDS: &str = "facerate_latency_seconds";
}

/// Outcome label for a successful request.
pub const OUTCOME_OK: &str = "ok";

/// Duration in fractional milliseconds.
pub fn duration_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Record metrics for a completed scoring request.
pub fn record_request(outcome: &'static str, latency_ms: f64) {
    counter!(names::REQUESTS_TOTAL, "outcome" => outcome).increment(1);

    histogram!(names::LATENCY_SECONDS, "outcome" => outcome).record(latency_ms / 1000.0);
}
