//! Data Transfer Objects for the JSON endpoints.
//!
//! Tokens themselves are returned as plain text; only health, readiness and
//! errors use the JSON envelope.

use serde::{Deserialize, Serialize};

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (0 = success, non-zero = error).
    pub code: i32,

    /// Human-readable message.
    pub message: String,

    /// Response data (null on error).
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response.
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    /// Create a response carrying data under a non-zero code.
    pub fn failure(code: i32, message: impl Into<String>, data: T) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Readiness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Whether the service can serve tokens.
    pub ready: bool,
    /// Per-component readiness.
    pub components: ReadyComponents,
}

/// Component readiness flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyComponents {
    /// The secure random source answered a probe.
    pub random_source: bool,
}
