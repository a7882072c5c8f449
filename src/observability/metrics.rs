//! Metrics collection and exposition.
//!
//! # Metrics
//! - `revive_requests_total` (counter): requests by method, status, outcome
//! - `revive_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Low-overhead updates via the metrics facade; recording is a no-op
//!   until an exporter is installed, so tests pay nothing
//! - The outcome label carries the classification, which is more useful
//!   for alerting than the raw status code

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }

    metrics::describe_counter!(
        "revive_requests_total",
        "Total revive requests by method, status and outcome"
    );
    metrics::describe_histogram!(
        "revive_request_duration_seconds",
        "Latency of revive request handling"
    );
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, outcome: &str, start: Instant) {
    metrics::counter!(
        "revive_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "revive_request_duration_seconds",
        "method" => method.to_string(),
        "outcome" => outcome.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
