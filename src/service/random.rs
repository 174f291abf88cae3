//! Secure random byte source.
//!
//! All randomness comes from the operating system CSPRNG. The [`RandomSource`]
//! trait exists so the generator can be driven by fixed bytes in tests and so
//! a broken source can be simulated for the startup probe.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::error::{RandomResult, RandomSourceError};

/// Number of bytes read by the startup probe.
pub const PROBE_BYTES: usize = 16;

/// A source of cryptographically secure random bytes.
///
/// Implementations must be safe to call from many requests at once without
/// external locking.
pub trait RandomSource: Send + Sync {
    /// Fill `buf` with random bytes and return how many were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source cannot be read.
    fn read(&self, buf: &mut [u8]) -> RandomResult<usize>;

    /// Return exactly `n` random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RandomSourceError::ShortRead`] if fewer than `n` bytes were
    /// produced, or the error of the underlying read.
    fn generate_bytes(&self, n: usize) -> RandomResult<Vec<u8>> {
        let mut buf = vec![0u8; n];
        if n == 0 {
            return Ok(buf);
        }

        let read = self.read(&mut buf)?;
        if read < n {
            return Err(RandomSourceError::ShortRead { requested: n, read });
        }

        Ok(buf)
    }
}

/// Operating system CSPRNG (`getrandom` and friends).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl OsRandom {
    /// Create a handle to the OS random source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RandomSource for OsRandom {
    fn read(&self, buf: &mut [u8]) -> RandomResult<usize> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| RandomSourceError::Unavailable(e.to_string()))?;
        Ok(buf.len())
    }
}

/// Check that `source` can deliver secure bytes.
///
/// Reads [`PROBE_BYTES`] bytes and rejects a sample whose bytes are all equal,
/// which is what a no-op or stuck source produces.
///
/// # Errors
///
/// Returns the read error, or [`RandomSourceError::Degenerate`].
pub fn probe(source: &dyn RandomSource) -> RandomResult<()> {
    let sample = source.generate_bytes(PROBE_BYTES)?;

    let first = sample[0];
    if sample.iter().all(|&b| b == first) {
        return Err(RandomSourceError::Degenerate);
    }

    Ok(())
}
