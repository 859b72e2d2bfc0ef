//! Repository whose every call fails with `StorageError::Unavailable`.
//!
//! Lets callers check fail-closed behaviour without a real outage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::revocation::{Fingerprint, RevocationRecord};
use crate::errors::{DomainError, DomainResult, StorageError};

use super::r#trait::RevocationRepository;

#[derive(Debug, Clone)]
pub struct FailingRevocationRepository {
    message: String,
}

impl FailingRevocationRepository {
    pub fn new() -> Self {
        Self::with_message("ledger unreachable")
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail<T>(&self) -> DomainResult<T> {
        Err(DomainError::Storage(StorageError::unavailable(&self.message)))
    }
}

impl Default for FailingRevocationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationRepository for FailingRevocationRepository {
    async fn insert(&self, _record: RevocationRecord) -> DomainResult<bool> {
        self.fail()
    }

    async fn exists(&self, _fingerprint: &Fingerprint) -> DomainResult<bool> {
        self.fail()
    }

    async fn find(&self, _fingerprint: &Fingerprint) -> DomainResult<Option<RevocationRecord>> {
        self.fail()
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> DomainResult<usize> {
        self.fail()
    }

    async fn count(&self) -> DomainResult<usize> {
        self.fail()
    }

    async fn health_check(&self) -> DomainResult<()> {
        self.fail()
    }
}
