//! Revocation ledger entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 of the full token string, hex encoded.
///
/// The whole token is hashed, signature included, so two tokens carrying the
/// same claim are revoked independently.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Length of the hex encoding
    pub const LEN: usize = 64;

    pub fn of_token(token: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wraps a fingerprint read back from storage
    pub fn from_hex(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 characters, enough to correlate log lines
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the revocation ledger. `expires_at` is always the expiry of
/// the revoked token itself, never later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    pub fingerprint: Fingerprint,
    pub expires_at: DateTime<Utc>,
}

impl RevocationRecord {
    pub fn new(fingerprint: Fingerprint, expires_at: DateTime<Utc>) -> Self {
        Self {
            fingerprint,
            expires_at,
        }
    }

    /// Eligible for purge once strictly past its expiry
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Outcome of one purge run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    /// Number of ledger rows removed
    pub deleted: usize,
    /// Cut-off used for the run
    pub ran_at: DateTime<Utc>,
    /// True when the run was skipped because another purge was in progress
    #[serde(default)]
    pub skipped: bool,
}
