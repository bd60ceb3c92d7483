//! # Pack-Size Catalog API
//!
//! ## Endpoints
//!
//! - `GET /api/v1/pack-sizes` — list pack sizes
//! - `POST /api/v1/pack-sizes` — add a pack size
//! - `GET /api/v1/pack-sizes/{id}` — get a pack size
//! - `PUT /api/v1/pack-sizes/{id}` — change a pack size
//! - `DELETE /api/v1/pack-sizes/{id}` — remove a pack size
//!
//! Sizes must be positive, at most `limits.max_pack_size`, and unique.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::LimitsConfig;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::{AppState, PackSizeRecord};

// ── Request/Response DTOs ───────────────────────────────────────────

/// Body for creating or changing a pack size.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PackSizeRequest {
    /// Items per pack.
    pub size: i64,
}

impl Validate for PackSizeRequest {
    fn validate(&self, limits: &LimitsConfig) -> Result<(), String> {
        if self.size <= 0 {
            return Err("pack size must be positive".to_string());
        }
        if self.size > limits.max_pack_size {
            return Err(format!(
                "pack size must not exceed {}, got {}",
                limits.max_pack_size, self.size
            ));
        }
        Ok(())
    }
}

/// All pack sizes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackSizeListResponse {
    /// Ordered by size, ascending.
    pub pack_sizes: Vec<PackSizeRecord>,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the pack-size router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/pack-sizes",
            get(list_pack_sizes).post(create_pack_size),
        )
        .route(
            "/api/v1/pack-sizes/{id}",
            get(get_pack_size)
                .put(update_pack_size)
                .delete(delete_pack_size),
        )
}

fn extract_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::BadRequest("invalid pack size id".to_string()))
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /api/v1/pack-sizes — List pack sizes.
#[utoipa::path(
    get,
    path = "/api/v1/pack-sizes",
    responses(
        (status = 200, description = "All pack sizes", body = PackSizeListResponse),
    ),
    tag = "pack_sizes"
)]
pub(crate) async fn list_pack_sizes(
    State(state): State<AppState>,
) -> Result<Json<PackSizeListResponse>, AppError> {
    let pack_sizes = state.list_pack_sizes().await?;
    Ok(Json(PackSizeListResponse { pack_sizes }))
}

/// POST /api/v1/pack-sizes — Add a pack size.
#[utoipa::path(
    post,
    path = "/api/v1/pack-sizes",
    request_body = PackSizeRequest,
    responses(
        (status = 201, description = "Pack size created", body = PackSizeRecord),
        (status = 409, description = "Size already exists", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "pack_sizes"
)]
pub(crate) async fn create_pack_size(
    State(state): State<AppState>,
    body: Result<Json<PackSizeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PackSizeRecord>), AppError> {
    let req = extract_validated_json(body, &state.config.limits)?;
    let record = state.create_pack_size(req.size).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/pack-sizes/{id} — Get a pack size.
#[utoipa::path(
    get,
    path = "/api/v1/pack-sizes/{id}",
    params(("id" = i64, Path, description = "Pack size ID")),
    responses(
        (status = 200, description = "Pack size", body = PackSizeRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "pack_sizes"
)]
pub(crate) async fn get_pack_size(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PackSizeRecord>, AppError> {
    let id = extract_id(path)?;
    Ok(Json(state.get_pack_size(id).await?))
}

/// PUT /api/v1/pack-sizes/{id} — Change a pack size.
#[utoipa::path(
    put,
    path = "/api/v1/pack-sizes/{id}",
    params(("id" = i64, Path, description = "Pack size ID")),
    request_body = PackSizeRequest,
    responses(
        (status = 200, description = "Pack size updated", body = PackSizeRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 409, description = "Size already exists", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "pack_sizes"
)]
pub(crate) async fn update_pack_size(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<PackSizeRequest>, JsonRejection>,
) -> Result<Json<PackSizeRecord>, AppError> {
    let id = extract_id(path)?;
    let req = extract_validated_json(body, &state.config.limits)?;
    Ok(Json(state.update_pack_size(id, req.size).await?))
}

/// DELETE /api/v1/pack-sizes/{id} — Remove a pack size.
#[utoipa::path(
    delete,
    path = "/api/v1/pack-sizes/{id}",
    params(("id" = i64, Path, description = "Pack size ID")),
    responses(
        (status = 204, description = "Pack size deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "pack_sizes"
)]
pub(crate) async fn delete_pack_size(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = extract_id(path)?;
    state.delete_pack_size(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_must_be_positive() {
        let limits = LimitsConfig::default();
        assert!(PackSizeRequest { size: 0 }.validate(&limits).is_err());
        assert!(PackSizeRequest { size: -250 }.validate(&limits).is_err());
        assert!(PackSizeRequest { size: 250 }.validate(&limits).is_ok());
    }

    #[test]
    fn size_above_limit_is_rejected() {
        let limits = LimitsConfig {
            max_pack_size: 1000,
            ..LimitsConfig::default()
        };
        assert!(PackSizeRequest { size: 1000 }.validate(&limits).is_ok());
        let err = PackSizeRequest { size: 1001 }.validate(&limits).unwrap_err();
        assert!(err.contains("must not exceed 1000"));
    }
}
