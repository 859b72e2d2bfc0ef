//! Domain-specific error types and error handling.

mod types;

pub use types::{StorageError, TokenError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// True for failures that must be reported to a caller as "unauthenticated"
    pub fn is_token_error(&self) -> bool {
        matches!(self, DomainError::Token(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
