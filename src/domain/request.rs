//! Token requests and the length policy applied at the HTTP boundary.

use tracing::{debug, warn};

use super::kind::TokenKind;
use crate::config::GeneratorConfig;

/// A single request for a token: what kind, and how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRequest {
    /// Kind of token.
    pub kind: TokenKind,
    /// Number of random bytes to draw. Always at least 1.
    pub length: usize,
}

impl TokenRequest {
    /// Build a request from the optional length segment of a path.
    ///
    /// Only strictly positive integers are accepted. A missing, empty,
    /// malformed or zero segment falls back to the configured default, and
    /// anything above the configured maximum is clamped to it. This never
    /// fails.
    #[must_use]
    pub fn resolve(kind: TokenKind, raw_length: Option<&str>, config: &GeneratorConfig) -> Self {
        let length = match raw_length.map(str::trim).filter(|s| !s.is_empty()) {
            None => config.default_length,
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => config.default_length,
                Ok(n) if n > config.max_length => {
                    debug!(requested = n, max = config.max_length, "Clamping token length");
                    config.max_length
                }
                Ok(n) => n,
                Err(e) => {
                    warn!(value = raw, error = %e, "Invalid token length, using default");
                    config.default_length
                }
            },
        };

        Self { kind, length }
    }
}
