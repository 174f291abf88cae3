//! Token generation handlers.
//!
//! `GET /get/{kind}[/[{length}]]` returns the token as plain text.
//!
//! Path segments that do not decode to UTF-8 are not rejected: they are
//! decoded lossily, so a bad kind is still an unknown kind and a bad length
//! still falls back to the default.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::Uri;
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::api::state::AppState;
use crate::domain::{TokenKind, TokenRequest};
use crate::error::Result;

/// Generate a token of the default length.
pub async fn generate_default(
    State(state): State<AppState>,
    uri: Uri,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<String> {
    let kind = match path {
        Ok(Path(kind)) => kind,
        Err(rejection) => {
            debug!(error = %rejection, "Undecodable path, decoding lossily");
            trailing_segments(&uri, 1).swap_remove(0)
        }
    };

    generate(&state, &kind, None)
}

/// Generate a token whose length comes from the last path segment.
pub async fn generate_with_length(
    State(state): State<AppState>,
    uri: Uri,
    path: std::result::Result<Path<(String, String)>, PathRejection>,
) -> Result<String> {
    let (kind, length) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => {
            debug!(error = %rejection, "Undecodable path, decoding lossily");
            let mut segments = trailing_segments(&uri, 2);
            let length = segments.swap_remove(1);
            (segments.swap_remove(0), length)
        }
    };

    generate(&state, &kind, Some(&length))
}

fn generate(state: &AppState, kind: &str, length: Option<&str>) -> Result<String> {
    let kind: TokenKind = kind.parse()?;
    let request = TokenRequest::resolve(kind, length, &state.config.generator);

    Ok(state.generator.generate_request(request)?)
}

/// Last `n` segments of the request path, percent-decoded lossily.
///
/// A single trailing slash is ignored. Missing segments come back empty, so
/// the result always has exactly `n` entries.
fn trailing_segments(uri: &Uri, n: usize) -> Vec<String> {
    let path = uri.path();
    let path = path.strip_suffix('/').unwrap_or(path);

    let mut segments: Vec<String> = path
        .rsplit('/')
        .take(n)
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect();
    segments.resize(n, String::new());
    segments.reverse();
    segments
}
