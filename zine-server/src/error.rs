//! API error type mapped onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (missing fields, undecodable payloads).
    #[error("{0}")]
    BadRequest(String),

    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The uploaded file type is not accepted.
    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    /// A layout template failed validation; carries the full error set.
    #[error("layout validation failed")]
    LayoutValidation(Vec<String>),

    /// Anything unexpected; logged, reported generically.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            Self::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            Self::UnsupportedMedia(mime) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                json!({ "error": format!("unsupported media type: {mime}") }),
            ),
            Self::LayoutValidation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "layout validation failed", "errors": errors }),
            ),
            Self::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
