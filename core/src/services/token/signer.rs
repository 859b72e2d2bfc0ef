//! HMAC-SHA256 token signing, issuance and verification

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use tracing::debug;
use validator::ValidateEmail;

use crate::domain::entities::claim::{IdentityClaim, Role};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::codec::{TokenCodec, MAX_TOKEN_LEN, SEPARATOR};
use super::config::TokenServiceConfig;

type HmacSha256 = Hmac<Sha256>;

/// A freshly issued token together with the claim it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claim: IdentityClaim,
}

/// Signs and verifies tokens with the shared secret.
///
/// Holds no mutable state: the keyed MAC is prepared once and cloned per call,
/// so a single instance can be shared across every request handler.
#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
    ttl: Duration,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TokenSigner)` - Ready to issue and verify
    /// * `Err(DomainError)` - Empty secret or non-positive lifetime
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        if config.secret.is_empty() {
            return Err(DomainError::Internal {
                message: "token secret must not be empty".to_string(),
            });
        }
        if config.ttl <= Duration::zero() {
            return Err(DomainError::validation("token lifetime must be positive"));
        }

        let mac = HmacSha256::new_from_slice(config.secret.expose().as_bytes()).map_err(|_| {
            DomainError::Internal {
                message: "invalid token secret".to_string(),
            }
        })?;

        Ok(Self {
            mac,
            ttl: config.ttl,
        })
    }

    /// Creates a signer with the given secret and the default 7 day lifetime
    pub fn with_secret(secret: impl Into<String>) -> DomainResult<Self> {
        Self::new(TokenServiceConfig::new(secret))
    }

    /// Default lifetime applied by [`TokenSigner::issue`]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Hex MAC over the encoded payload bytes
    pub fn sign(&self, encoded_payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(encoded_payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Issues a token with the configured lifetime
    pub fn issue(&self, subject: &str, email: &str, role: Role) -> DomainResult<IssuedToken> {
        self.issue_at(subject, email, role, self.ttl, Utc::now())
    }

    /// Issues a token with an explicit lifetime
    pub fn issue_with_ttl(
        &self,
        subject: &str,
        email: &str,
        role: Role,
        ttl: Duration,
    ) -> DomainResult<IssuedToken> {
        self.issue_at(subject, email, role, ttl, Utc::now())
    }

    /// Issues a token as of `now`
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - The token string and the embedded claim
    /// * `Err(DomainError::Validation)` - Empty subject, malformed email, ttl out of
    ///   range, or a token too long to ever be verified
    pub fn issue_at(
        &self,
        subject: &str,
        email: &str,
        role: Role,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> DomainResult<IssuedToken> {
        if subject.trim().is_empty() {
            return Err(DomainError::validation("subject must not be empty"));
        }
        if !email.validate_email() {
            return Err(DomainError::validation("email is not valid"));
        }
        if ttl <= Duration::zero() || now.checked_add_signed(ttl).is_none() {
            return Err(DomainError::validation("token lifetime out of range"));
        }

        let claim = IdentityClaim::new(subject, email, role, ttl, now);
        let payload = TokenCodec::encode(&claim);
        let signature = self.sign(&payload);
        let token = format!("{}{}{}", payload, SEPARATOR, signature);
        if token.len() > MAX_TOKEN_LEN {
            return Err(DomainError::validation("token too long"));
        }

        debug!(
            subject = %claim.subject,
            role = %claim.role,
            expires_at = claim.expires_at,
            "Issued token"
        );

        Ok(IssuedToken { token, claim })
    }

    /// Verifies signature and expiry against the current time
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as of `now`.
    ///
    /// Decode first, then signature (constant-time), then expiry. The
    /// revocation ledger is not consulted here.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaim, TokenError> {
        let parts = TokenCodec::split(token)?;
        let claim = TokenCodec::decode_payload(parts.payload)?;

        let expected = self.sign(parts.payload);
        if !constant_time_eq(expected.as_bytes(), parts.signature.as_bytes()) {
            return Err(TokenError::BadSignature);
        }

        if claim.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claim)
    }
}
