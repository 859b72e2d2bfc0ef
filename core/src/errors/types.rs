//! Error kinds for the token lifecycle.
//!
//! The variants of `TokenError` are distinct for logging only. The HTTP layer
//! collapses all of them into a single unauthenticated response.

use thiserror::Error;

/// Token decode, verification and revocation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Structurally invalid wire format: separator count, base64, or claim fields
    #[error("Malformed token")]
    MalformedToken,

    /// MAC over the payload did not match
    #[error("Bad token signature")]
    BadSignature,

    /// Claim expiry is in the past
    #[error("Token expired")]
    Expired,

    /// Fingerprint found in the revocation ledger. Built by
    /// `Unauthenticated::token_error` for gate rejections.
    #[error("Token revoked")]
    Revoked,

    /// No bearer credential on the request. Built by
    /// `Unauthenticated::token_error` for gate rejections.
    #[error("Missing credential")]
    MissingCredential,

    /// Revocation was asked for a token that cannot be decoded
    #[error("Invalid token")]
    InvalidToken,
}

/// Revocation ledger backend failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend unreachable or the call timed out
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    /// A stored row could not be mapped back into a record
    #[error("Corrupt ledger row: {message}")]
    Corrupt { message: String },
}

impl StorageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StorageError::Unavailable {
            message: message.into(),
        }
    }
}
