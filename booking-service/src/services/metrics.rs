//! Metrics collection and Prometheus export.
//!
//! Booking counters go through the `metrics` facade; `/metrics` renders
//! whatever the installed recorder holds.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Repeated calls reuse the first handle.
pub fn init_metrics() -> &'static PrometheusHandle {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    })
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

#[derive(Debug, Clone, Copy)]
pub enum SubmissionOutcome {
    Created,
    Rejected,
    Failed,
}

impl SubmissionOutcome {
    fn as_str(self) -> &'static str {
        match self {
            SubmissionOutcome::Created => "created",
            SubmissionOutcome::Rejected => "rejected",
            SubmissionOutcome::Failed => "failed",
        }
    }
}

pub fn record_submission(outcome: SubmissionOutcome) {
    counter!("bookings_submitted_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_listing(ok: bool) {
    let outcome = if ok { "ok" } else { "failed" };
    counter!("bookings_listed_total", "outcome" => outcome).increment(1);
}
