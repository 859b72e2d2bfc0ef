//! Revocation repository trait defining the interface for ledger persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::revocation::{Fingerprint, RevocationRecord};
use crate::errors::DomainResult;

/// Persistence contract for the revocation ledger
///
/// Implementations must be safe to share across request handlers and the
/// cleanup task. Every backend failure is reported as
/// `DomainError::Storage`, never swallowed.
///
/// # Invariants
/// - At most one record per fingerprint
/// - `insert` of an existing fingerprint is a no-op, not an error
/// - `delete_expired` removes exactly the records with `expires_at < now`
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Store a record unless its fingerprint is already present
    ///
    /// # Returns
    /// * `Ok(true)` - The record was newly inserted
    /// * `Ok(false)` - The fingerprint was already revoked
    /// * `Err(DomainError::Storage)` - Backend failure
    async fn insert(&self, record: RevocationRecord) -> DomainResult<bool>;

    /// Whether the fingerprint is in the ledger
    async fn exists(&self, fingerprint: &Fingerprint) -> DomainResult<bool>;

    /// Fetch the stored record for a fingerprint
    async fn find(&self, fingerprint: &Fingerprint) -> DomainResult<Option<RevocationRecord>>;

    /// Delete every record whose `expires_at` is strictly before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<usize>;

    /// Number of records currently held
    async fn count(&self) -> DomainResult<usize>;

    /// Round trip to the backend without touching any record
    async fn health_check(&self) -> DomainResult<()>;
}
