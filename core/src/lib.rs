//! # TokenGate Core
//!
//! Token lifecycle for the TokenGate backend: signed bearer tokens, the
//! revocation ledger and its purge scheduler, and the per-request gate.
//! This crate holds domain entities, services, the repository interface and
//! error types. Storage backends live in `tg_infra`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AuthenticatedIdentity, Fingerprint, IdentityClaim, PurgeReport, RevocationRecord, Role,
};
pub use errors::{DomainError, DomainResult, StorageError, TokenError};
pub use repositories::{
    FailingRevocationRepository, InMemoryRevocationRepository, RevocationRepository,
};
pub use services::{
    AuthGate, IssuedToken, RevocationLedger, RevocationScheduler, SchedulerConfig,
    SchedulerHandle, TokenServiceConfig, TokenSigner, Unauthenticated,
};
