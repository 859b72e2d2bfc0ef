//! Token signing and internal-call authentication configuration

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder secret used when nothing is configured
pub const DEFAULT_TOKEN_SECRET: &str = "development-secret-please-change-in-production";

/// Default token lifetime: 7 days
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Longest token lifetime accepted from configuration or at issuance: one year
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

/// A configuration value that must never appear in logs or serialized output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw secret material. Only hand this to code that needs the bytes.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED])")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Secret)
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to sign and verify tokens
    #[serde(default = "default_secret")]
    pub secret: Secret,

    /// Lifetime of an issued token in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,

    /// Key other services present in `X-Internal-Key` for internal-only calls.
    /// Internal routes are refused while this is unset.
    #[serde(default)]
    pub internal_key: Option<Secret>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            token_ttl_seconds: default_token_ttl(),
            internal_key: None,
        }
    }
}

impl AuthConfig {
    /// Create a configuration with the given secret and default lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret),
            ..Default::default()
        }
    }

    /// Set the token lifetime in days
    pub fn with_ttl_days(mut self, days: i64) -> Self {
        self.token_ttl_seconds = days * 86400;
        self
    }

    /// Set the internal service key
    pub fn with_internal_key(mut self, key: impl Into<String>) -> Self {
        self.internal_key = Some(Secret::new(key));
        self
    }

    /// Check if using the placeholder secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret.expose() == DEFAULT_TOKEN_SECRET
    }
}

fn default_secret() -> Secret {
    Secret::new(DEFAULT_TOKEN_SECRET)
}

fn default_token_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_SECONDS
}
