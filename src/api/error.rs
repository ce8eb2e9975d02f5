//! Error responses for the HTTP API.
//!
//! Every failure is rendered as `{ "error": "<message>" }`. Internal faults
//! carry diagnostic detail for the logs only; callers get a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::haptic::TranslateError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, empty, not JSON, or not a JSON object
    #[error("JSON data is required")]
    MissingBody,

    #[error("Text field is required")]
    MissingText,

    /// A field had the wrong shape (e.g. a non-numeric speed)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Detail is logged by the caller, never sent
    #[error("Failed to process haptic translation. Please try again later.")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingBody | ApiError::MissingText | ApiError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TranslateError> for ApiError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::EmptyText => ApiError::MissingText,
            other @ TranslateError::KeyDerivation(_) => ApiError::Internal(other.to_string()),
        }
    }
}

/// Error body: `{ "error": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), axum::Json(body)).into_response()
    }
}
