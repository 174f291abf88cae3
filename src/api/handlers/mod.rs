//! Request handlers.

pub mod health;
pub mod help;
pub mod token;
