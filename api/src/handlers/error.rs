//! Mapping of domain failures onto HTTP responses.
//!
//! Every authentication failure leaves the service as the same 401 body so a
//! caller cannot tell which check rejected the token.

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;
use validator::ValidationErrors;

use tg_core::errors::{DomainError, StorageError, TokenError};
use tg_core::services::auth::Unauthenticated;

use crate::dto::error::ErrorResponse;

/// Public message for every rejected token
pub const INVALID_TOKEN_MESSAGE: &str = "invalid or expired token";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    /// Revocation asked for a token that does not decode
    #[error("token could not be decoded")]
    InvalidToken,

    #[error("revocation ledger unavailable")]
    StorageUnavailable,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "unauthenticated",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::Validation(_) => "validation_error",
            ApiError::InvalidToken => "invalid_token",
            ApiError::StorageUnavailable => "storage_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Validation(_) | ApiError::InvalidToken => StatusCode::BAD_REQUEST,
            ApiError::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let ApiError::Unauthenticated(_) = self {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(ErrorResponse::new(self.error_code(), self.to_string()))
    }
}

impl From<Unauthenticated> for ApiError {
    fn from(err: Unauthenticated) -> Self {
        ApiError::Unauthenticated(err.public_message())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => ApiError::Validation(message),
            DomainError::Token(TokenError::InvalidToken) => ApiError::InvalidToken,
            DomainError::Token(TokenError::MissingCredential) => {
                ApiError::Unauthenticated("missing credential")
            }
            DomainError::Token(_) => ApiError::Unauthenticated(INVALID_TOKEN_MESSAGE),
            DomainError::Storage(e) => {
                match &e {
                    StorageError::Unavailable { .. } => log::error!("Ledger unavailable: {}", e),
                    StorageError::Corrupt { .. } => log::error!("Ledger corrupt: {}", e),
                }
                ApiError::StorageUnavailable
            }
            DomainError::Internal { message } => {
                log::error!("Internal error: {}", message);
                ApiError::Internal("An internal error occurred".to_string())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();
        fields.sort();
        ApiError::Validation(format!("Invalid request data ({})", fields.join("; ")))
    }
}
