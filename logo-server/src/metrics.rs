//! Prometheus metrics for logo-server.
//!
//! Provides metrics collection and a Prometheus-compatible `/metrics` endpoint.
//! Recording without an installed recorder is a no-op.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Metric names as constants for consistency
const STRATEGY_ATTEMPTS_TOTAL: &str = "logo_strategy_attempts_total";
const GENERATION_RESULTS_TOTAL: &str = "logo_generation_results_total";
const GENERATION_ERRORS_TOTAL: &str = "logo_generation_errors_total";
const HTTP_REQUEST_DURATION: &str = "logo_http_request_duration_seconds";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record one strategy attempt.
///
/// # Arguments
///
/// * `strategy` - Strategy name (direct_raster, multimodal_image, ...)
/// * `outcome` - "success", "declined", "empty" or "failure"
pub fn record_strategy_attempt(strategy: &'static str, outcome: &'static str) {
    counter!(
        STRATEGY_ATTEMPTS_TOTAL,
        "strategy" => strategy,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a result returned to a caller, by wire kind.
pub fn record_generation_result(kind: &'static str) {
    counter!(GENERATION_RESULTS_TOTAL, "kind" => kind).increment(1);
}

/// Record an error returned to a caller.
///
/// # Arguments
///
/// * `kind` - "invalid_request", "configuration" or "upstream"
pub fn record_generation_error(kind: &'static str) {
    counter!(GENERATION_ERRORS_TOTAL, "kind" => kind).increment(1);
}

/// Record how long a request to `route` took.
pub fn record_http_request(route: &str, status: u16, duration_secs: f64) {
    histogram!(
        HTTP_REQUEST_DURATION,
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .record(duration_secs);
}

/// Middleware recording the duration of every routed request.
///
/// Must be installed with `route_layer` so the matched path is known.
pub async fn track_http_requests(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());

    let started = Instant::now();
    let response = next.run(request).await;
    record_http_request(
        &route,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}
