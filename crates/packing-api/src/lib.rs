//! # packing-api — Axum Service for the Pack Optimization Engine
//!
//! Wraps `packing-core` with a pack-size catalog (Postgres or in-memory) and
//! an HTTP surface.
//!
//! ## API Surface
//!
//! | Path                           | Module                    | Purpose               |
//! |--------------------------------|---------------------------|-----------------------|
//! | `/api/v1/calculate`            | [`routes::calculate`]     | Order calculation     |
//! | `/api/v1/config`               | [`routes::calculate`]     | Current catalog       |
//! | `/api/v1/pack-sizes/*`         | [`routes::pack_sizes`]    | Catalog CRUD          |
//! | `/`                            | [`routes::web`]           | HTML order form       |
//! | `/openapi.json`                | [`openapi`]               | OpenAPI document      |
//! | `/health`, `/health/*`         | this module               | Probes                |
//! | `/metrics`                     | this module               | Prometheus exposition |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → [CORS, /api/v1 only] → Handler
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Request body limit. Every body this service accepts is a few bytes.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::calculate::router())
        .merge(routes::pack_sizes::router())
        .layer(middleware::cors::layer());

    Router::new()
        .merge(api)
        .merge(routes::web::router())
        .merge(openapi::router())
        .route("/health", get(health))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(prometheus_metrics))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — plain-text health check.
async fn health() -> &'static str {
    "OK"
}

/// Liveness probe. Always 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. 503 when the database does not answer.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }
    (StatusCode::OK, "ready").into_response()
}

/// GET /metrics — Prometheus text exposition, 404 when no recorder is installed.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}
