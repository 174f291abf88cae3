//! Service layer module.
//!
//! Contains the secure random source and the token generator built on it.

pub mod random;
pub mod token;

pub use random::{OsRandom, PROBE_BYTES, RandomSource, probe};
pub use token::{GENERATION_FAILURES, TOKENS_GENERATED, TokenGenerator};
