//! Domain models for the token service.
//!
//! This module contains the character domain tables, the selectable token
//! kinds, the per-request length policy and the API response envelope.

pub mod charset;
pub mod dto;
pub mod kind;
pub mod request;

pub use charset::Charset;
pub use dto::{ApiResponse, HealthResponse, ReadyComponents, ReadyResponse};
pub use kind::{TokenKind, UnknownKind};
pub use request::TokenRequest;
