//! Application-level error type for HTTP handlers.
//!
//! Wraps domain and pipeline errors and implements [`IntoResponse`] to
//! produce consistent JSON error responses. Every pipeline failure kind
//! maps onto a distinct status + code so callers can decide whether a
//! higher-level retry makes sense.

use atelier_core::error::CoreError;
use atelier_openai::SynthesisError;
use atelier_pipeline::PipelineError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors surfaced by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `atelier-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A generation pipeline failure.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Pipeline(pipeline) => classify_pipeline_error(pipeline),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a core error onto a status, code, and message.
///
/// An unknown style surfacing here comes from a lookup route (explore by
/// slug), so it is a 404; the pipeline reports its own unknown-style case
/// as a validation failure instead.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::UnknownStyle(slug) => (
            StatusCode::NOT_FOUND,
            "STYLE_NOT_FOUND",
            format!("Unknown style '{slug}'"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Map a pipeline failure onto a status, code, and message.
fn classify_pipeline_error(err: &PipelineError) -> (StatusCode, &'static str, String) {
    match err {
        PipelineError::InvalidInput(core) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            core.to_string(),
        ),
        PipelineError::Synthesis(SynthesisError::Timeout(_)) => (
            StatusCode::GATEWAY_TIMEOUT,
            "SYNTHESIS_TIMEOUT",
            err.to_string(),
        ),
        PipelineError::Synthesis(SynthesisError::Rejected(_)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "SYNTHESIS_REJECTED",
            err.to_string(),
        ),
        PipelineError::Synthesis(SynthesisError::Unavailable(_)) => (
            StatusCode::BAD_GATEWAY,
            "SYNTHESIS_UNAVAILABLE",
            err.to_string(),
        ),
        PipelineError::Derivative(_) => {
            tracing::error!(error = %err, "Variant production failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DERIVATIVE_FAILURE",
                err.to_string(),
            )
        }
        PipelineError::StoreUpload { .. } => (
            StatusCode::BAD_GATEWAY,
            "STORE_UPLOAD_FAILED",
            err.to_string(),
        ),
        PipelineError::CatalogCommit(_) => {
            tracing::error!(error = %err, "Catalog commit failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CATALOG_COMMIT_FAILED",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn invalid_input_is_a_client_error() {
        let err = PipelineError::InvalidInput(CoreError::Validation("empty".into()));
        let (status, code, _) = classify_pipeline_error(&err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn synthesis_kinds_are_discriminable() {
        let timeout =
            PipelineError::Synthesis(SynthesisError::Timeout(Duration::from_secs(45)));
        let rejected = PipelineError::Synthesis(SynthesisError::Rejected("blocked".into()));
        let unavailable =
            PipelineError::Synthesis(SynthesisError::Unavailable("exhausted".into()));

        assert_eq!(
            classify_pipeline_error(&timeout).0,
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            classify_pipeline_error(&rejected).0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            classify_pipeline_error(&unavailable).0,
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn unknown_style_on_lookup_routes_is_not_found() {
        let (status, code, _) = classify_core_error(&CoreError::UnknownStyle("banksy".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "STYLE_NOT_FOUND");
    }

    #[test]
    fn commit_failure_message_is_sanitized() {
        let err = PipelineError::CatalogCommit("connection details leaked".into());
        let (status, _, message) = classify_pipeline_error(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("connection details"));
    }
}
