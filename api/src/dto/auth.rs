use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use tg_core::domain::entities::claim::Role;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueTokenRequest {
    /// Subject identifier, e.g. the user id
    #[validate(length(min = 1, max = 255))]
    pub subject: String,

    #[validate(email)]
    pub email: String,

    /// "admin" or "viewer"
    pub role: String,

    /// Lifetime override, at most one year. The configured default applies
    /// when absent.
    #[validate(range(min = 1, max = 31_536_000))]
    pub ttl_seconds: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTokenResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds since the Unix epoch
    pub expires_at: i64,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RevokeRequest {
    #[validate(length(min = 1, max = 4096))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeResponse {
    pub revoked: bool,
    /// When the ledger entry, and the token with it, expires
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub deleted: usize,
    pub ran_at: DateTime<Utc>,
    /// Another purge was already running; nothing was done
    pub skipped: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub subject: String,
    pub email: String,
    pub role: Role,
}
