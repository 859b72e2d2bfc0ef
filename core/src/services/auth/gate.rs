//! Authentication gate.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::entities::claim::AuthenticatedIdentity;
use crate::domain::entities::revocation::Fingerprint;
use crate::errors::{DomainError, StorageError, TokenError};
use crate::repositories::RevocationRepository;
use crate::services::revocation::RevocationLedger;
use crate::services::token::TokenSigner;

/// Authorization scheme accepted by the gate
pub const BEARER_SCHEME: &str = "Bearer";

/// Why a request was not authenticated.
///
/// The variants exist for logging. Callers outside the service should only
/// ever see [`Unauthenticated::public_message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unauthenticated {
    #[error("missing credential")]
    MissingCredential,

    #[error("invalid or expired token")]
    Invalid(TokenError),

    #[error("revoked")]
    Revoked,

    /// The ledger could not be consulted, so the request fails closed
    #[error("revocation ledger unavailable")]
    LedgerUnavailable(StorageError),
}

impl Unauthenticated {
    /// Message safe to return to the caller. Only a missing credential is
    /// distinguishable from every other rejection.
    pub fn public_message(&self) -> &'static str {
        match self {
            Unauthenticated::MissingCredential => "missing credential",
            _ => "invalid or expired token",
        }
    }

    /// The token failure behind this rejection, `None` when the ledger
    /// could not be consulted
    pub fn token_error(&self) -> Option<TokenError> {
        match self {
            Unauthenticated::MissingCredential => Some(TokenError::MissingCredential),
            Unauthenticated::Invalid(e) => Some(e.clone()),
            Unauthenticated::Revoked => Some(TokenError::Revoked),
            Unauthenticated::LedgerUnavailable(_) => None,
        }
    }

    /// Short label of the underlying reason, for logs and metrics
    pub fn reason(&self) -> &'static str {
        match self.token_error() {
            Some(TokenError::MissingCredential) => "missing_credential",
            Some(TokenError::MalformedToken) => "malformed",
            Some(TokenError::BadSignature) => "bad_signature",
            Some(TokenError::Expired) => "expired",
            Some(TokenError::Revoked) => "revoked",
            Some(TokenError::InvalidToken) => "invalid",
            None => "storage_unavailable",
        }
    }
}

/// Pulls the token out of an `Authorization` header value.
///
/// The scheme is matched case-insensitively. Any other scheme, or an empty
/// token, counts as no credential at all.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Per-request entry point: header to identity
pub struct AuthGate<R: RevocationRepository + ?Sized> {
    signer: Arc<TokenSigner>,
    ledger: Arc<RevocationLedger<R>>,
}

impl<R: RevocationRepository + ?Sized> Clone for AuthGate<R> {
    fn clone(&self) -> Self {
        Self {
            signer: self.signer.clone(),
            ledger: self.ledger.clone(),
        }
    }
}

impl<R: RevocationRepository + ?Sized> AuthGate<R> {
    pub fn new(signer: Arc<TokenSigner>, ledger: Arc<RevocationLedger<R>>) -> Self {
        Self { signer, ledger }
    }

    pub fn signer(&self) -> &Arc<TokenSigner> {
        &self.signer
    }

    pub fn ledger(&self) -> &Arc<RevocationLedger<R>> {
        &self.ledger
    }

    /// Authenticate from a raw `Authorization` header value
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedIdentity, Unauthenticated> {
        self.authenticate_at(authorization, Utc::now()).await
    }

    pub async fn authenticate_at(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedIdentity, Unauthenticated> {
        let token = extract_bearer(authorization).ok_or_else(|| {
            debug!("Request without bearer credential");
            Unauthenticated::MissingCredential
        })?;
        self.authenticate_token_at(token, now).await
    }

    /// Authenticate an already extracted token
    pub async fn authenticate_token(
        &self,
        token: &str,
    ) -> Result<AuthenticatedIdentity, Unauthenticated> {
        self.authenticate_token_at(token, Utc::now()).await
    }

    /// Verify, then check the ledger.
    ///
    /// Signature and expiry are checked before the ledger so a forged token
    /// never costs a storage round trip.
    pub async fn authenticate_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedIdentity, Unauthenticated> {
        let claim = self.signer.verify_at(token, now).map_err(|e| {
            debug!(reason = %e, "Token rejected");
            Unauthenticated::Invalid(e)
        })?;

        match self.ledger.is_revoked(token).await {
            Ok(false) => Ok(AuthenticatedIdentity::from(claim)),
            Ok(true) => {
                debug!(
                    fingerprint = Fingerprint::of_token(token).short(),
                    subject = %claim.subject,
                    "Revoked token presented"
                );
                Err(Unauthenticated::Revoked)
            }
            Err(DomainError::Storage(e)) => {
                error!("Revocation check failed, rejecting request: {}", e);
                Err(Unauthenticated::LedgerUnavailable(e))
            }
            Err(e) => {
                warn!("Unexpected revocation check failure, rejecting request: {}", e);
                Err(Unauthenticated::LedgerUnavailable(StorageError::unavailable(
                    e.to_string(),
                )))
            }
        }
    }
}
