//! Character domain tables.
//!
//! Every table is built once per process and shared read-only afterwards.
//! Each one owns its own allocation; composite tables copy their parts into a
//! fresh buffer instead of extending an existing table.

use std::sync::LazyLock;

/// An ordered, non-empty set of distinct output characters.
#[derive(Debug, PartialEq, Eq)]
pub struct Charset {
    chars: Box<[u8]>,
}

impl Charset {
    /// Build a charset from its parts, copied in order into a new buffer.
    fn concat(parts: &[&[u8]]) -> Self {
        let mut chars = Vec::with_capacity(parts.iter().map(|p| p.len()).sum());
        for part in parts {
            chars.extend_from_slice(part);
        }
        debug_assert!(!chars.is_empty());
        Self {
            chars: chars.into_boxed_slice(),
        }
    }

    /// Number of characters in the domain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; a charset is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters, in domain order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    /// Map a random byte onto the domain: `chars[byte mod len]`.
    ///
    /// Sizes that do not divide 256 favour the lower residues slightly. That
    /// bias is part of the output contract and is kept as is.
    #[must_use]
    pub fn char_for(&self, byte: u8) -> char {
        char::from(self.chars[usize::from(byte) % self.chars.len()])
    }

    /// Whether `c` belongs to the domain.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        u8::try_from(c).is_ok_and(|b| self.chars.contains(&b))
    }
}

const DIGITS: &[u8] = b"0123456789";
const HEX_LOWER: &[u8] = b"abcdef";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// `0-9`.
pub static NUMBER: LazyLock<Charset> = LazyLock::new(|| Charset::concat(&[DIGITS]));

/// `0-9a-f`.
pub static HEX: LazyLock<Charset> = LazyLock::new(|| Charset::concat(&[DIGITS, HEX_LOWER]));

/// `A-Z` then `a-z`.
pub static ALPHA: LazyLock<Charset> = LazyLock::new(|| Charset::concat(&[UPPER, LOWER]));

/// Digits followed by letters.
pub static ALPHANUM: LazyLock<Charset> =
    LazyLock::new(|| Charset::concat(&[NUMBER.as_bytes(), ALPHA.as_bytes()]));

/// Printable ASCII, 0x20 through 0x7E inclusive.
pub static SPECIAL: LazyLock<Charset> = LazyLock::new(|| {
    let printable: Vec<u8> = (0x20..=0x7E).collect();
    Charset::concat(&[&printable])
});

/// Force construction of every table.
///
/// Called during bootstrap so the tables exist before the first request.
pub fn init() {
    LazyLock::force(&NUMBER);
    LazyLock::force(&HEX);
    LazyLock::force(&ALPHA);
    LazyLock::force(&ALPHANUM);
    LazyLock::force(&SPECIAL);
}
