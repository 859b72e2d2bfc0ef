//! Configuration for the token signer

use chrono::Duration;
use tg_shared::config::auth::{AuthConfig, Secret, DEFAULT_TOKEN_SECRET};

use crate::domain::entities::claim::DEFAULT_TOKEN_TTL_DAYS;

/// Configuration for the token signer
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Shared HMAC secret
    pub secret: Secret,
    /// Lifetime of issued tokens
    pub ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: Secret::new(DEFAULT_TOKEN_SECRET),
            ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
        }
    }
}

impl TokenServiceConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret),
            ..Default::default()
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            // Out-of-range values become a zero lifetime, which TokenSigner::new refuses
            ttl: Duration::try_seconds(config.token_ttl_seconds).unwrap_or_else(Duration::zero),
        }
    }
}
