//! HTTP error mapping for API handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use focal_core::error::FocalError;
use serde_json::json;

/// An error already shaped for an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "authentication required".into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<FocalError> for ApiError {
    fn from(err: FocalError) -> Self {
        let status = match &err {
            FocalError::NotFound { .. } => StatusCode::NOT_FOUND,
            FocalError::AlreadyExists { .. } => StatusCode::CONFLICT,
            FocalError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            FocalError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            FocalError::Database(_)
            | FocalError::Configuration(_)
            | FocalError::Crypto(_)
            | FocalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
