//! Identity claim carried inside a token.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default token lifetime (7 days)
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Role carried in the token. The set is closed: anything else on the wire
/// makes the token malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator
    Admin,
    /// Read-only user
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Viewer => "viewer",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Decoded token payload.
///
/// Serialized field names are the wire names: `sub`, `email`, `role`, `exp`.
/// Unknown fields are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// Subject identifier
    #[serde(rename = "sub")]
    pub subject: String,

    /// Email address of the subject
    pub email: String,

    /// Role of the subject
    pub role: Role,

    /// Absolute expiry, seconds since the Unix epoch
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl IdentityClaim {
    /// Creates a claim that expires `ttl` after `now`
    pub fn new(
        subject: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
            role,
            expires_at: (now + ttl).timestamp(),
        }
    }

    /// A claim is expired only once `now` is strictly past `expires_at`;
    /// at the exact second of expiry it is still accepted.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now.timestamp()
    }

    /// Expiry as a timestamp, `None` if out of chrono's range
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }
}

/// Identity handed downstream once a request passes the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    pub subject: String,
    pub email: String,
    pub role: Role,
}

impl From<IdentityClaim> for AuthenticatedIdentity {
    fn from(claim: IdentityClaim) -> Self {
        Self {
            subject: claim.subject,
            email: claim.email,
            role: claim.role,
        }
    }
}
