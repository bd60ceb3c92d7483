//! # CORS
//!
//! The JSON API is called from browser front-ends on other origins, so it
//! accepts any origin. No credentials are involved.

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Build the `/api/v1` CORS layer.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
