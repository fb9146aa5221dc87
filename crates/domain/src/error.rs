//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required setting is missing or invalid. Fatal at construction time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A user payload could not be turned into a user.
    #[error("invalid user data: {0}")]
    InvalidUser(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
