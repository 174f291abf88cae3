//! Token generation.
//!
//! A token is built from `length` secure random bytes:
//! - For a character domain, each byte `b` selects `charset[b mod len]`,
//!   so the output has exactly `length` characters.
//! - For the raw kind (`any`), the bytes are URL-safe base64 encoded and the
//!   output is longer than `length`.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::URL_SAFE};
use tracing::{debug, error, info};

use crate::domain::{TokenKind, TokenRequest, charset};
use crate::error::RandomResult;
use crate::service::random::{self, RandomSource};

/// Metric: tokens generated, labelled by kind.
pub const TOKENS_GENERATED: &str = "randtoken_tokens_generated_total";

/// Metric: generation failures, labelled by kind.
pub const GENERATION_FAILURES: &str = "randtoken_generation_failures_total";

/// Stateless token generator over a shared random source.
#[derive(Clone)]
pub struct TokenGenerator {
    source: Arc<dyn RandomSource>,
}

impl TokenGenerator {
    /// Create a generator without probing the source.
    #[must_use]
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Build the character tables, probe the source, and create a generator.
    ///
    /// This is the initialization phase of the service: no request may be
    /// served with a generator whose source failed the probe.
    ///
    /// # Errors
    ///
    /// Returns the probe failure.
    pub fn initialize(source: Arc<dyn RandomSource>) -> RandomResult<Self> {
        charset::init();
        random::probe(source.as_ref())?;
        info!(probe_bytes = random::PROBE_BYTES, "Secure random source verified");
        Ok(Self::new(source))
    }

    /// Check that the source still answers.
    ///
    /// # Errors
    ///
    /// Returns the probe failure.
    pub fn probe(&self) -> RandomResult<()> {
        random::probe(self.source.as_ref())
    }

    /// Generate a token of `kind` from `length` random bytes.
    ///
    /// Either the whole token is returned or the source error is; nothing is
    /// produced from a partial read.
    ///
    /// # Errors
    ///
    /// Returns the random source error.
    pub fn generate(&self, kind: TokenKind, length: usize) -> RandomResult<String> {
        let bytes = match self.source.generate_bytes(length) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(%kind, length, error = %e, "Random source failed");
                metrics::counter!(GENERATION_FAILURES, "kind" => kind.as_str()).increment(1);
                return Err(e);
            }
        };

        let token = match kind.charset() {
            Some(charset) => bytes.iter().map(|&b| charset.char_for(b)).collect(),
            None => URL_SAFE.encode(&bytes),
        };

        debug!(%kind, length, "Token generated");
        metrics::counter!(TOKENS_GENERATED, "kind" => kind.as_str()).increment(1);

        Ok(token)
    }

    /// Generate the token described by `request`.
    ///
    /// # Errors
    ///
    /// Returns the random source error.
    pub fn generate_request(&self, request: TokenRequest) -> RandomResult<String> {
        self.generate(request.kind, request.length)
    }
}

impl std::fmt::Debug for TokenGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGenerator").finish_non_exhaustive()
    }
}
