//! # AppError
//!
//! Centralized error handling for the bug-tracker ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all bt-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (unresolvable bug id)
    #[error("{0} not found")]
    NotFound(String),

    /// Validation failure: one human-readable message per violated rule,
    /// including rejected lifecycle transitions
    #[error("validation error: {0:?}")]
    Validation(Vec<String>),

    /// Credential missing, malformed, expired, or unverifiable
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not the creator of the record being mutated
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Infrastructure failure (e.g., store unreachable)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for bug-tracker logic.
pub type Result<T> = std::result::Result<T, AppError>;
