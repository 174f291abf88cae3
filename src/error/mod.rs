//! Error handling module.
//!
//! This module provides unified error handling with proper HTTP status code mapping
//! and standardized API error responses.

pub mod codes;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::ErrorCode;

use crate::domain::UnknownKind;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The path named a token kind that does not exist.
    #[error("Unknown token kind: {0}")]
    UnknownKind(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The secure random source failed.
    #[error("Random source error: {0}")]
    RandomSource(#[from] RandomSourceError),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownKind(_) => ErrorCode::UNKNOWN_KIND,
            Self::NotFound(_) => ErrorCode::NOT_FOUND,
            Self::RandomSource(_) => ErrorCode::RANDOM_SOURCE_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownKind(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RandomSource(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UnknownKind> for AppError {
    fn from(err: UnknownKind) -> Self {
        Self::UnknownKind(err.0)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().as_i32();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code = code,
                status = %status,
                message = %message,
                "Request failed"
            );
        } else {
            tracing::debug!(
                error_code = code,
                status = %status,
                message = %message,
                "Request rejected"
            );
        }

        let body = Json(json!({
            "code": code,
            "message": message,
            "data": null
        }));

        (status, body).into_response()
    }
}

/// Failure to obtain bytes from the secure random source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RandomSourceError {
    /// The operating system source could not be read.
    #[error("secure random source unavailable: {0}")]
    Unavailable(String),

    /// The source returned fewer bytes than requested.
    #[error("short read from secure random source: wanted {requested} bytes, got {read}")]
    ShortRead {
        /// Bytes requested.
        requested: usize,
        /// Bytes actually produced.
        read: usize,
    },

    /// The source produced an obviously broken sample.
    #[error("secure random source returned a degenerate sample")]
    Degenerate,
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `RandomSourceError`.
pub type RandomResult<T> = std::result::Result<T, RandomSourceError>;
