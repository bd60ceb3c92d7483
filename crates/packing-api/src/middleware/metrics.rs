//! # Request Metrics
//!
//! Records per-request counters and latency through the `metrics` facade.
//! With no recorder installed (tests, embedded use) every call is a no-op.
//! The binary installs a Prometheus recorder and `/metrics` renders it.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Total HTTP requests, labelled by method, route, and status.
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
/// Request latency in seconds, labelled by method and route.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
/// Engine invocations, labelled by outcome.
pub const PACK_CALCULATIONS_TOTAL: &str = "pack_calculations_total";

/// Install the global Prometheus recorder. Call once per process.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Count a calculation outcome (`ok`, `invalid_order`, ...).
pub fn record_calculation(outcome: &'static str) {
    metrics::counter!(PACK_CALCULATIONS_TOTAL, "outcome" => outcome).increment(1);
}

/// Middleware recording request count and latency.
///
/// The route label uses the matched path template (`/api/v1/pack-sizes/{id}`)
/// rather than the raw URI, keeping label cardinality bounded.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method,
        "route" => route
    )
    .record(started.elapsed().as_secs_f64());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[tokio::test]
    async fn passes_responses_through_without_recorder() {
        let app = Router::new()
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .layer(axum::middleware::from_fn(metrics_middleware));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/teapot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }
}
