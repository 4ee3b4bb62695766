//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps lifecycle, store and summarizer errors to HTTP status codes and a
//! flat JSON body:
//!
//! ```json
//! {"error": "Validation failed", "code": "VALIDATION_FAILED",
//!  "details": [{"field": "style", "message": "..."}]}
//! ```
//!
//! Internal and upstream failure details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docsum_lifecycle::{LifecycleError, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Client message for every internal error.
pub const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Client message for every summarization failure.
pub const SUMMARIZATION_MESSAGE: &str = "Failed to generate summary. Please try again later.";

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldIssue {
    /// Request field the issue applies to.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl FieldIssue {
    /// Build an issue for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_FAILED").
    pub code: String,
    /// Field-level issues, present only for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldIssue>>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more request fields failed validation (400).
    #[error("validation failed: {0:?}")]
    Validation(Vec<FieldIssue>),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A path or body identifier was malformed (400).
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Authentication failure (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller does not own the resource (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Conflict with existing state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The summarization service failed (503). The reason is logged only.
    #[error("summarization unavailable: {0}")]
    SummarizationUnavailable(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::InvalidIdentifier(_) => (StatusCode::BAD_REQUEST, "INVALID_IDENTIFIER"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::SummarizationUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SUMMARIZATION_UNAVAILABLE")
            }
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn into_body(self) -> ErrorBody {
        let (_, code) = self.status_and_code();
        let (error, details) = match self {
            Self::Validation(issues) => ("Validation failed".to_string(), Some(issues)),
            Self::BadRequest(msg)
            | Self::InvalidIdentifier(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => (msg, None),
            Self::SummarizationUnavailable(_) => (SUMMARIZATION_MESSAGE.to_string(), None),
            Self::Internal(_) => (INTERNAL_MESSAGE.to_string(), None),
        };
        ErrorBody {
            error,
            code: code.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::SummarizationUnavailable(_) => {
                tracing::warn!(error = %self, "summarization unavailable")
            }
            _ => {}
        }

        (status, Json(self.into_body())).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NotFound(kind) => Self::NotFound(format!("{kind} not found")),
            forbidden @ LifecycleError::Forbidden { .. } => Self::Forbidden(forbidden.to_string()),
            LifecycleError::InvalidIdentifier(id) => {
                Self::InvalidIdentifier(format!("Invalid {} ID format", id.kind))
            }
            LifecycleError::InvalidInput(model) => match model {
                docsum_core::ModelError::EmptyDocumentContent => Self::Validation(vec![
                    FieldIssue::new("content", "Content cannot be empty"),
                ]),
                docsum_core::ModelError::UnknownStyle(_) => Self::Validation(vec![
                    FieldIssue::new("style", crate::routes::summaries::STYLE_MESSAGE),
                ]),
                other => Self::BadRequest(other.to_string()),
            },
            LifecycleError::SummarizationUnavailable(reason) => {
                Self::SummarizationUnavailable(reason)
            }
            LifecycleError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsum_core::IdError;
    use docsum_lifecycle::ResourceKind;
    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::Validation(vec![]), StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (
                AppError::InvalidIdentifier("x".into()),
                StatusCode::BAD_REQUEST,
                "INVALID_IDENTIFIER",
            ),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (
                AppError::SummarizationUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
                "SUMMARIZATION_UNAVAILABLE",
            ),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{err}");
        }
    }

    #[tokio::test]
    async fn validation_body_carries_details() {
        let (status, body) = response_parts(AppError::Validation(vec![FieldIssue::new(
            "style",
            "bad style",
        )]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["details"][0]["field"], "style");
        assert_eq!(body["details"][0]["message"], "bad style");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("db connection failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn summarization_hides_upstream_reason() {
        let (status, body) =
            response_parts(AppError::SummarizationUnavailable("upstream 500: secret".into()))
                .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], SUMMARIZATION_MESSAGE);
    }

    #[test]
    fn lifecycle_errors_map_to_taxonomy() {
        let not_found = AppError::from(LifecycleError::NotFound(ResourceKind::Document));
        assert!(matches!(&not_found, AppError::NotFound(m) if m == "Document not found"));

        let forbidden = AppError::from(LifecycleError::Forbidden {
            action: "access this document",
        });
        assert!(matches!(forbidden, AppError::Forbidden(_)));

        let invalid = AppError::from(LifecycleError::InvalidIdentifier(IdError {
            kind: "document",
            value: "zzz".into(),
        }));
        assert!(matches!(&invalid, AppError::InvalidIdentifier(m) if m == "Invalid document ID format"));

        let store = AppError::from(LifecycleError::Store(StoreError::Backend("pg down".into())));
        assert!(matches!(store, AppError::Internal(_)));
    }
}
