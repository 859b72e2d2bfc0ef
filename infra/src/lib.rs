//! # Infrastructure Layer
//!
//! Concrete storage for the TokenGate revocation ledger.
//!
//! - **Database**: MySQL connection pool and the `RevocationRepository`
//!   implementation using SQLx
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use tg_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlRevocationRepository, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => {
                DomainError::Storage(StorageError::unavailable(e.to_string()))
            }
            InfrastructureError::Config(message) => DomainError::Internal { message },
        }
    }
}
