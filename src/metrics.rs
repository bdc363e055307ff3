//! Prometheus metrics for route registration and request handling.
//!
//! This module provides:
//! - Route registration counts
//! - Per-endpoint request counts and latency
//! - User listing counts

use std::time::Instant;

use axum::routing::get;
use axum::Router;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Routes registered counter metric name.
pub const METRIC_ROUTES_REGISTERED: &str = "routes_registered_total";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Users listed counter metric name.
pub const METRIC_USERS_LISTED: &str = "users_listed_total";

/// Path the Prometheus exposition is served on.
pub const PATH_METRICS: &str = "/metrics";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(
        METRIC_ROUTES_REGISTERED,
        "Total number of routes registered at startup"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests handled");
    describe_counter!(
        METRIC_USERS_LISTED,
        "Total number of user records returned by the listing endpoint"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder as the global metrics recorder.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Router serving the rendered metrics on [`PATH_METRICS`].
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route(PATH_METRICS, get(move || std::future::ready(handle.render())))
}

/// Increment routes registered counter.
pub fn inc_routes_registered() {
    counter!(METRIC_ROUTES_REGISTERED).increment(1);
}

/// Increment requests counter for `endpoint`.
pub fn inc_http_requests(endpoint: &'static str) {
    counter!(METRIC_HTTP_REQUESTS, "endpoint" => endpoint).increment(1);
}

/// Add `count` to the users listed counter.
pub fn add_users_listed(count: usize) {
    counter!(METRIC_USERS_LISTED).increment(count as u64);
}

/// RAII guard for timing a request.
/// Records latency for its endpoint when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing a request to `endpoint`.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint)
            .record(self.elapsed_ms());
    }
}

/// Count a request to `endpoint` and time it until the returned guard drops.
pub fn track_request(endpoint: &'static str) -> LatencyTimer {
    inc_http_requests(endpoint);
    LatencyTimer::new(endpoint)
}
