//! # Request Extraction & Validation
//!
//! [`Validate`] for request DTOs and helpers that turn JSON rejections into
//! [`AppError::BadRequest`] and rule failures into [`AppError::Validation`].

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request types whose business rules go beyond what serde checks.
///
/// `limits` lets a rule depend on runtime admission limits.
pub trait Validate {
    /// Validate business rules. Returns an error message on failure.
    fn validate(&self, limits: &crate::config::LimitsConfig) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it against `limits`.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
    limits: &crate::config::LimitsConfig,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate(limits).map_err(AppError::Validation)?;
    Ok(value)
}
