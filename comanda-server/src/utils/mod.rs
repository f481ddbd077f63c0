//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - HTTP-facing error type and result alias
//! - [`logger`] - tracing subscriber setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult};
