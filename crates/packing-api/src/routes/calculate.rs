//! # Calculation API
//!
//! ## Endpoints
//!
//! - `POST /api/v1/calculate` — compute the pack solution for an order
//! - `GET /api/v1/config` — current catalog sizes
//!
//! Each calculation takes a fresh catalog snapshot from the state and hands
//! it to the engine; nothing is cached between requests.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use packing_core::{PackSolution, PackingError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::LimitsConfig;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::middleware::metrics::record_calculation;
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Order to fulfil.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateRequest {
    /// Number of items ordered. Must be positive.
    pub items: i64,
}

impl Validate for CalculateRequest {
    fn validate(&self, limits: &LimitsConfig) -> Result<(), String> {
        // Non-positive orders are left to the engine, which owns that rule.
        if self.items > limits.max_order {
            return Err(format!(
                "items ordered must not exceed {}, got {}",
                limits.max_order, self.items
            ));
        }
        Ok(())
    }
}

/// One pack size in a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PackQuantity {
    pub size: u64,
    pub quantity: u64,
}

/// How an order is fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalculateResponse {
    pub items_ordered: u64,
    pub total_items_shipped: u64,
    pub total_packs: u64,
    /// Packs by descending size.
    pub packs: Vec<PackQuantity>,
    pub excess_items: u64,
}

impl From<&PackSolution> for CalculateResponse {
    fn from(solution: &PackSolution) -> Self {
        Self {
            items_ordered: solution.items_ordered(),
            total_items_shipped: solution.total_items(),
            total_packs: solution.total_packs(),
            packs: solution
                .packs()
                .iter()
                .map(|line| PackQuantity {
                    size: line.size(),
                    quantity: line.quantity(),
                })
                .collect(),
            excess_items: solution.excess(),
        }
    }
}

/// Current catalog.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfigResponse {
    /// Pack sizes, ascending.
    pub pack_sizes: Vec<i64>,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the calculation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/calculate", post(calculate))
        .route("/api/v1/config", get(get_config))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /api/v1/calculate — Compute the pack solution for an order.
#[utoipa::path(
    post,
    path = "/api/v1/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Pack solution", body = CalculateResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 409, description = "No pack sizes configured", body = crate::error::ErrorBody),
        (status = 422, description = "Order not positive or above limit", body = crate::error::ErrorBody),
    ),
    tag = "calculate"
)]
pub(crate) async fn calculate(
    State(state): State<AppState>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let req = extract_validated_json(body, &state.config.limits)?;
    let solution = solve(&state, req.items).await?;
    Ok(Json(CalculateResponse::from(&solution)))
}

/// GET /api/v1/config — Current catalog sizes.
#[utoipa::path(
    get,
    path = "/api/v1/config",
    responses(
        (status = 200, description = "Current pack sizes", body = ConfigResponse),
    ),
    tag = "calculate"
)]
pub(crate) async fn get_config(
    State(state): State<AppState>,
) -> Result<Json<ConfigResponse>, AppError> {
    let pack_sizes = state.catalog_snapshot().await?;
    Ok(Json(ConfigResponse { pack_sizes }))
}

// ── Shared ──────────────────────────────────────────────────────────

/// Snapshot the catalog and run the engine for `items`.
///
/// The engine is CPU-bound and sized by the order, so it runs on the
/// blocking pool rather than on a runtime worker.
pub(crate) async fn solve(state: &AppState, items: i64) -> Result<PackSolution, AppError> {
    let sizes = state.catalog_snapshot().await?;
    let result =
        tokio::task::spawn_blocking(move || packing_core::compute_from_sizes(items, &sizes))
            .await
            .map_err(|e| AppError::Internal(format!("calculation task failed: {e}")))?;
    record_calculation(outcome_label(&result));

    let solution = result?;
    tracing::info!(
        items,
        total_items = solution.total_items(),
        total_packs = solution.total_packs(),
        "order calculated"
    );
    Ok(solution)
}

fn outcome_label(result: &Result<PackSolution, PackingError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(PackingError::InvalidOrder { .. }) => "invalid_order",
        Err(PackingError::EmptyCatalog) => "empty_catalog",
        Err(PackingError::Infeasible { .. }) => "infeasible",
        Err(PackingError::WindowOverflow { .. }) => "window_overflow",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_from_solution() {
        let solution = packing_core::compute_from_sizes(501, &[250, 500]).unwrap();
        let response = CalculateResponse::from(&solution);
        assert_eq!(response.items_ordered, 501);
        assert_eq!(response.total_items_shipped, 750);
        assert_eq!(response.total_packs, 2);
        assert_eq!(response.excess_items, 249);
        assert_eq!(
            response.packs,
            vec![
                PackQuantity { size: 500, quantity: 1 },
                PackQuantity { size: 250, quantity: 1 },
            ]
        );
    }

    #[test]
    fn order_above_limit_fails_validation() {
        let limits = LimitsConfig {
            max_order: 100,
            ..LimitsConfig::default()
        };
        assert!(CalculateRequest { items: 100 }.validate(&limits).is_ok());
        let err = CalculateRequest { items: 101 }.validate(&limits).unwrap_err();
        assert!(err.contains("must not exceed 100"));
    }

    #[test]
    fn non_positive_order_passes_to_engine() {
        let limits = LimitsConfig::default();
        assert!(CalculateRequest { items: 0 }.validate(&limits).is_ok());
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(outcome_label(&packing_core::compute_from_sizes(1, &[1])), "ok");
        assert_eq!(
            outcome_label(&Err(PackingError::EmptyCatalog)),
            "empty_catalog"
        );
    }

    #[tokio::test]
    async fn solve_uses_current_catalog() {
        let state = AppState::new();
        state.create_pack_size(1).await.unwrap();
        let solution = solve(&state, 7).await.unwrap();
        assert_eq!(solution.total_items(), 7);
    }

    /// On the single-threaded test runtime a task spawned before `solve` can
    /// only run if `solve` yields while the engine computes.
    #[tokio::test]
    async fn solve_does_not_hold_the_runtime() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let state = AppState::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        let solution = solve(&state, 1_000_000).await.unwrap();
        assert_eq!(solution.total_items(), 1_000_000);
        assert!(ran.load(Ordering::SeqCst));
    }
}
