//! MySQL implementation of the RevocationRepository trait.
//!
//! Backed by the `revoked_tokens` table. Every call is a single statement on
//! the primary pool, so a revocation is visible to the next lookup from any
//! process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use tg_core::domain::entities::revocation::{Fingerprint, RevocationRecord};
use tg_core::errors::{DomainError, DomainResult, StorageError};
use tg_core::repositories::RevocationRepository;

use crate::database::REVOKED_TOKENS_SCHEMA;

/// MySQL implementation of RevocationRepository
#[derive(Clone)]
pub struct MySqlRevocationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationRepository {
    /// Create a new MySQL revocation repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create the `revoked_tokens` table if missing
    pub async fn ensure_schema(&self) -> DomainResult<()> {
        sqlx::query(REVOKED_TOKENS_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("create revoked_tokens table", e))?;
        Ok(())
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> DomainResult<RevocationRecord> {
        let fingerprint: String = row
            .try_get("fingerprint")
            .map_err(|e| corrupt("fingerprint", e))?;
        let expires_at: DateTime<Utc> = row
            .try_get("expires_at")
            .map_err(|e| corrupt("expires_at", e))?;

        Ok(RevocationRecord::new(
            Fingerprint::from_hex(fingerprint),
            expires_at,
        ))
    }
}

fn unavailable(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!("Revocation ledger query failed ({}): {}", context, e);
    DomainError::Storage(StorageError::unavailable(format!(
        "Failed to {}: {}",
        context, e
    )))
}

fn corrupt(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Storage(StorageError::Corrupt {
        message: format!("Failed to get {}: {}", column, e),
    })
}

#[async_trait]
impl RevocationRepository for MySqlRevocationRepository {
    async fn insert(&self, record: RevocationRecord) -> DomainResult<bool> {
        // A duplicate fingerprint is ignored rather than raised, so racing
        // logouts for the same token both succeed.
        let query = r#"
            INSERT IGNORE INTO revoked_tokens (fingerprint, expires_at)
            VALUES (?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(record.fingerprint.as_str())
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("insert revocation", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, fingerprint: &Fingerprint) -> DomainResult<bool> {
        let query = "SELECT 1 FROM revoked_tokens WHERE fingerprint = ? LIMIT 1";

        let row = sqlx::query(query)
            .bind(fingerprint.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unavailable("check revocation", e))?;

        Ok(row.is_some())
    }

    async fn find(&self, fingerprint: &Fingerprint) -> DomainResult<Option<RevocationRecord>> {
        let query = r#"
            SELECT fingerprint, expires_at
            FROM revoked_tokens
            WHERE fingerprint = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(fingerprint.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unavailable("find revocation", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let query = "DELETE FROM revoked_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("delete expired revocations", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn count(&self) -> DomainResult<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM revoked_tokens")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unavailable("count revocations", e))?;

        let total: i64 = row.try_get("total").map_err(|e| corrupt("total", e))?;
        Ok(total as usize)
    }

    async fn health_check(&self) -> DomainResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("reach revocation ledger", e))?;
        Ok(())
    }
}
