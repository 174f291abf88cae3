//! Token kinds selectable through the request path.

use std::str::FromStr;

use super::charset::{ALPHA, ALPHANUM, Charset, HEX, NUMBER, SPECIAL};

/// Kind of token to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Decimal digits.
    Number,
    /// Lowercase hexadecimal digits.
    Hex,
    /// Upper and lowercase letters.
    Alpha,
    /// Digits and letters.
    AlphaNum,
    /// Any 7-bit printable character, space included.
    Special,
    /// Raw bytes, URL-safe base64 encoded.
    Any,
}

impl TokenKind {
    /// Every kind, in help-page order.
    pub const ALL: [Self; 6] = [
        Self::Number,
        Self::Hex,
        Self::Alpha,
        Self::AlphaNum,
        Self::Special,
        Self::Any,
    ];

    /// Path name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Hex => "hex",
            Self::Alpha => "alpha",
            Self::AlphaNum => "alphanum",
            Self::Special => "special",
            Self::Any => "any",
        }
    }

    /// One-line description used by the help page.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Number => "numerical characters",
            Self::Hex => "hexadecimal characters",
            Self::Alpha => "alphabetical characters",
            Self::AlphaNum => "alphabetical and numerical characters",
            Self::Special => "any 7-bit printable characters",
            Self::Any => "any 8-bit characters URL-safe base64-encoded",
        }
    }

    /// Character domain for this kind, or `None` for raw output.
    #[must_use]
    pub fn charset(self) -> Option<&'static Charset> {
        match self {
            Self::Number => Some(&*NUMBER),
            Self::Hex => Some(&*HEX),
            Self::Alpha => Some(&*ALPHA),
            Self::AlphaNum => Some(&*ALPHANUM),
            Self::Special => Some(&*SPECIAL),
            Self::Any => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a path segment names no known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
