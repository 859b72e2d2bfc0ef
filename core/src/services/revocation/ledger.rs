//! Revocation ledger service.
//!
//! Wraps a [`RevocationRepository`] with the token-level operations: a token
//! is fingerprinted as a whole and its ledger entry expires together with the
//! token itself.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::revocation::{Fingerprint, RevocationRecord};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::RevocationRepository;
use crate::services::token::TokenCodec;

/// Durable set of revoked token fingerprints
pub struct RevocationLedger<R: RevocationRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: RevocationRepository + ?Sized> RevocationLedger<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Revoke a token until its own expiry
    ///
    /// The signature is not checked here. Callers exposed to untrusted input
    /// must verify the token first.
    ///
    /// # Returns
    /// * `Ok(RevocationRecord)` - The ledger entry, whether new or already present
    /// * `Err(DomainError::Token(InvalidToken))` - The token could not be decoded
    /// * `Err(DomainError::Storage(_))` - The ledger could not be written
    pub async fn revoke(&self, token: &str) -> DomainResult<RevocationRecord> {
        let claim = TokenCodec::decode(token).map_err(|_| TokenError::InvalidToken)?;
        let expires_at = claim.expiry().ok_or(TokenError::InvalidToken)?;

        let record = RevocationRecord::new(Fingerprint::of_token(token), expires_at);
        let inserted = self.repository.insert(record.clone()).await?;

        if inserted {
            info!(
                fingerprint = record.fingerprint.short(),
                subject = %claim.subject,
                expires_at = %record.expires_at,
                "Token revoked"
            );
        } else {
            debug!(
                fingerprint = record.fingerprint.short(),
                "Token already revoked"
            );
        }

        Ok(record)
    }

    /// Whether this exact token string has been revoked
    pub async fn is_revoked(&self, token: &str) -> DomainResult<bool> {
        self.repository.exists(&Fingerprint::of_token(token)).await
    }

    /// Whether the backing store can be reached. Every authenticated
    /// request depends on it.
    pub async fn health_check(&self) -> DomainResult<()> {
        self.repository.health_check().await
    }

    /// Delete ledger entries whose tokens expired strictly before `now`
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let deleted = self.repository.delete_expired(now).await?;
        info!(deleted, cutoff = %now, "Purged expired revocations");
        Ok(deleted)
    }
}
