//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented JSON routes into one OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Packing API",
        description = "Order fulfilment with whole packs: fewest items shipped, then fewest packs.",
    ),
    paths(
        // Calculation
        crate::routes::calculate::calculate,
        crate::routes::calculate::get_config,
        // Pack sizes
        crate::routes::pack_sizes::list_pack_sizes,
        crate::routes::pack_sizes::create_pack_size,
        crate::routes::pack_sizes::get_pack_size,
        crate::routes::pack_sizes::update_pack_size,
        crate::routes::pack_sizes::delete_pack_size,
    ),
    components(schemas(
        crate::state::PackSizeRecord,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::calculate::CalculateRequest,
        crate::routes::calculate::CalculateResponse,
        crate::routes::calculate::PackQuantity,
        crate::routes::calculate::ConfigResponse,
        crate::routes::pack_sizes::PackSizeRequest,
        crate::routes::pack_sizes::PackSizeListResponse,
    )),
    tags(
        (name = "calculate", description = "Order calculation"),
        (name = "pack_sizes", description = "Pack-size catalog management"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_json_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/api/v1/calculate",
            "/api/v1/config",
            "/api/v1/pack-sizes",
            "/api/v1/pack-sizes/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
        }
    }
}
