//! In-memory revocation repository.
//!
//! Used by tests and by the API when started without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::revocation::{Fingerprint, RevocationRecord};
use crate::errors::DomainResult;

use super::r#trait::RevocationRepository;

/// Revocation ledger held in a map behind an async lock
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationRepository {
    records: Arc<RwLock<HashMap<Fingerprint, RevocationRecord>>>,
}

impl InMemoryRevocationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationRepository for InMemoryRevocationRepository {
    async fn insert(&self, record: RevocationRecord) -> DomainResult<bool> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.fingerprint) {
            return Ok(false);
        }

        records.insert(record.fingerprint.clone(), record);
        Ok(true)
    }

    async fn exists(&self, fingerprint: &Fingerprint) -> DomainResult<bool> {
        let records = self.records.read().await;
        Ok(records.contains_key(fingerprint))
    }

    async fn find(&self, fingerprint: &Fingerprint) -> DomainResult<Option<RevocationRecord>> {
        let records = self.records.read().await;
        Ok(records.get(fingerprint).cloned())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        Ok(before - records.len())
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.records.read().await.len())
    }

    async fn health_check(&self) -> DomainResult<()> {
        Ok(())
    }
}
