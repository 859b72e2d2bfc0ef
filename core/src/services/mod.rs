//! Business services for the token lifecycle.

pub mod auth;
pub mod revocation;
pub mod token;

// Re-export commonly used types
pub use auth::{extract_bearer, AuthGate, Unauthenticated};
pub use revocation::{RevocationLedger, RevocationScheduler, SchedulerConfig, SchedulerHandle};
pub use token::{IssuedToken, TokenCodec, TokenServiceConfig, TokenSigner};
