//! Application error types and JSON:API error documents.
//!
//! Every failure surfaced to a client is rendered as a JSON:API error
//! document (`{"errors": [{status, title, detail?}]}`) with the
//! `application/vnd.api+json` content type. The HTTP response status always
//! matches the `status` member of the emitted error object.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Content type identifying JSON:API responses.
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("not authorized")]
    NotAuthorized,

    /// Request-shape validation failure carrying its own status and message,
    /// emitted before any persistence call is attempted.
    #[error("{detail}")]
    Validation { status: StatusCode, detail: String },

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Validation error with a 400 Bad Request status.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        AppError::Validation {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::NotAuthorized => StatusCode::FORBIDDEN,
            AppError::Validation { status, .. } => *status,
        }
    }
}

/// One member of a JSON:API error document.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorObject {
    /// HTTP status code as a string.
    pub status: String,

    /// Standard reason phrase for the status.
    pub title: String,

    /// Human-readable detail, present only for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorObject {
    /// Build an error object from a status code and optional detail message.
    pub fn from_status(status: StatusCode, detail: Option<String>) -> Self {
        Self {
            status: status.as_u16().to_string(),
            title: status.canonical_reason().unwrap_or("Unknown").to_string(),
            detail,
        }
    }
}

/// JSON:API error document. Always carries exactly one error object.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    pub fn new(object: ErrorObject) -> Self {
        Self {
            errors: vec![object],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details never leak to the client; log them here.
        let detail = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                None
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                None
            }
            AppError::Validation { detail, .. } => Some(detail.clone()),
            _ => None,
        };

        let document = ErrorDocument::new(ErrorObject::from_status(status, detail));

        (
            status,
            [(header::CONTENT_TYPE, JSON_API_CONTENT_TYPE)],
            Json(document),
        )
            .into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn not_authorized_maps_to_403() {
        assert_eq!(AppError::NotAuthorized.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unexpected_errors_map_to_500() {
        let err = AppError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_carries_status_and_detail() {
        let err = AppError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "page[offset] out of range".to_string(),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "page[offset] out of range");
    }

    #[test]
    fn error_object_uses_reason_phrase() {
        let obj = ErrorObject::from_status(StatusCode::FORBIDDEN, None);
        assert_eq!(obj.status, "403");
        assert_eq!(obj.title, "Forbidden");
        assert!(obj.detail.is_none());
    }

    #[test]
    fn error_document_holds_single_object() {
        let doc = ErrorDocument::new(ErrorObject::from_status(
            StatusCode::BAD_REQUEST,
            Some("malformed filter".to_string()),
        ));
        assert_eq!(doc.errors.len(), 1);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["errors"][0]["status"], "400");
        assert_eq!(json["errors"][0]["title"], "Bad Request");
        assert_eq!(json["errors"][0]["detail"], "malformed filter");
    }
}
