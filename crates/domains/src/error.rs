//! # AppError
//!
//! Centralized error handling for the blog API.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain and service operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Resource not found (e.g., Post)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., missing title, oversized subtitle)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Credential mismatch on an admin-gated operation
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (e.g., DB down mid-request)
    #[error("internal service error: {0}")]
    Internal(String),

    /// Rate limit exceeded
    #[error("too many requests: {0}")]
    RateLimitExceeded(String),
}

impl AppError {
    pub fn post_not_found(id: impl ToString) -> Self {
        AppError::NotFound("Post".to_string(), id.to_string())
    }
}

/// A specialized Result type for blog domain logic.
pub type Result<T> = std::result::Result<T, AppError>;
