//! Error code constants.
//!
//! Error codes are organized by category:
//! - 4xxx: Resource errors
//! - 5xxx: Internal/System errors

/// Error code type with semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    // ===== Resource Errors (4xxx) =====

    /// Resource not found.
    pub const NOT_FOUND: Self = Self(4001);

    /// Token kind not recognised.
    pub const UNKNOWN_KIND: Self = Self(4002);

    // ===== Internal/System Errors (5xxx) =====

    /// Secure random source failure.
    pub const RANDOM_SOURCE_ERROR: Self = Self(5001);

    /// Service unavailable.
    pub const SERVICE_UNAVAILABLE: Self = Self(5003);

    /// Get the error code as an i32.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Get the category of this error code.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.0 {
            4000..=4999 => ErrorCategory::Resource,
            5000..=5999 => ErrorCategory::Internal,
            _ => ErrorCategory::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

/// Error category based on error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Resource errors (4xxx).
    Resource,
    /// Internal/system errors (5xxx).
    Internal,
    /// Unknown category.
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resource => write!(f, "resource"),
            Self::Internal => write!(f, "internal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
