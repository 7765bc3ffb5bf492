//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Per-request error with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body declared as JSON but could not be parsed (400)
    InvalidJson { message: String },

    /// Request is well-formed but unusable (400)
    BadRequest { message: String },

    /// Body exceeds the configured limit (413)
    PayloadTooLarge { limit: usize },

    /// JSON body in a charset other than UTF-8 (415)
    UnsupportedCharset { charset: String },

    /// No route matched (404)
    NotFound { method: String, path: String },

    /// Database error (500, logged)
    Database(sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedCharset { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::InvalidJson { message } => json!({
                "error": "invalid_json",
                "message": message
            }),
            Self::BadRequest { message } => json!({
                "error": "bad_request",
                "message": message
            }),
            Self::PayloadTooLarge { limit } => json!({
                "error": "payload_too_large",
                "message": format!("request body exceeds {} bytes", limit)
            }),
            Self::UnsupportedCharset { charset } => json!({
                "error": "unsupported_media_type",
                "message": format!("unsupported charset \"{}\"", charset)
            }),
            Self::NotFound { method, path } => json!({
                "error": "not_found",
                "message": format!("cannot {} {}", method, path)
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e)
    }
}
