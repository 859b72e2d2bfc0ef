//! Unit tests for the authentication gate

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::claim::Role;
use crate::errors::{StorageError, TokenError};
use crate::repositories::{
    FailingRevocationRepository, InMemoryRevocationRepository, RevocationRepository,
};
use crate::services::auth::{extract_bearer, AuthGate, Unauthenticated};
use crate::services::revocation::RevocationLedger;
use crate::services::token::{TokenSigner, SEPARATOR};

fn gate_with<R: RevocationRepository + ?Sized>(repo: Arc<R>) -> AuthGate<R> {
    AuthGate::new(
        Arc::new(TokenSigner::with_secret("gate-test-secret").unwrap()),
        Arc::new(RevocationLedger::new(repo)),
    )
}

fn gate() -> AuthGate<InMemoryRevocationRepository> {
    gate_with(Arc::new(InMemoryRevocationRepository::new()))
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[test]
fn test_extract_bearer() {
    assert_eq!(extract_bearer(Some("Bearer abc.def")), Some("abc.def"));
    assert_eq!(extract_bearer(Some("bearer abc.def")), Some("abc.def"));
    assert_eq!(extract_bearer(Some("BEARER   abc.def  ")), Some("abc.def"));
    assert_eq!(extract_bearer(Some("Basic dXNlcjpwYXNz")), None);
    assert_eq!(extract_bearer(Some("Bearer")), None);
    assert_eq!(extract_bearer(Some("Bearer   ")), None);
    assert_eq!(extract_bearer(Some("abc.def")), None);
    assert_eq!(extract_bearer(Some("")), None);
    assert_eq!(extract_bearer(None), None);
}

#[tokio::test]
async fn test_valid_token_yields_identity() {
    let gate = gate();
    let issued = gate.signer().issue("u1", "a@x.com", Role::Admin).unwrap();

    let identity = gate.authenticate(Some(&bearer(&issued.token))).await.unwrap();
    assert_eq!(identity.subject, "u1");
    assert_eq!(identity.email, "a@x.com");
    assert_eq!(identity.role, Role::Admin);
}

#[tokio::test]
async fn test_missing_credential() {
    let gate = gate();

    assert_eq!(
        gate.authenticate(None).await.unwrap_err(),
        Unauthenticated::MissingCredential
    );
    assert_eq!(
        gate.authenticate(Some("Basic abc")).await.unwrap_err(),
        Unauthenticated::MissingCredential
    );
}

#[tokio::test]
async fn test_invalid_tokens_share_public_message() {
    let gate = gate();
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let issued = gate
        .signer()
        .issue_at("u1", "a@x.com", Role::Viewer, Duration::hours(1), now)
        .unwrap();
    let (payload, _) = issued.token.split_once(SEPARATOR).unwrap();
    let forged = format!("{}{}{}", payload, SEPARATOR, "f".repeat(64));

    let malformed = gate.authenticate_at(Some("Bearer junk"), now).await.unwrap_err();
    let bad_sig = gate.authenticate_at(Some(&bearer(&forged)), now).await.unwrap_err();
    let expired = gate
        .authenticate_at(Some(&bearer(&issued.token)), now + Duration::hours(2))
        .await
        .unwrap_err();

    assert_eq!(malformed, Unauthenticated::Invalid(TokenError::MalformedToken));
    assert_eq!(bad_sig, Unauthenticated::Invalid(TokenError::BadSignature));
    assert_eq!(expired, Unauthenticated::Invalid(TokenError::Expired));
    assert_eq!(bad_sig.reason(), "bad_signature");

    for err in [&malformed, &bad_sig, &expired, &Unauthenticated::Revoked] {
        assert_eq!(err.public_message(), "invalid or expired token");
    }
    assert_eq!(
        Unauthenticated::MissingCredential.public_message(),
        "missing credential"
    );
}

#[test]
fn test_rejections_map_to_token_errors() {
    assert_eq!(
        Unauthenticated::MissingCredential.token_error(),
        Some(TokenError::MissingCredential)
    );
    assert_eq!(Unauthenticated::Revoked.token_error(), Some(TokenError::Revoked));
    assert_eq!(
        Unauthenticated::Invalid(TokenError::Expired).token_error(),
        Some(TokenError::Expired)
    );
    let outage = Unauthenticated::LedgerUnavailable(StorageError::unavailable("down"));
    assert_eq!(outage.token_error(), None);
    assert_eq!(outage.reason(), "storage_unavailable");
    assert_eq!(Unauthenticated::MissingCredential.reason(), "missing_credential");
}

#[tokio::test]
async fn test_revoked_token_is_rejected() {
    let gate = gate();
    let issued = gate.signer().issue("u1", "a@x.com", Role::Viewer).unwrap();
    let header = bearer(&issued.token);

    assert!(gate.authenticate(Some(&header)).await.is_ok());
    gate.ledger().revoke(&issued.token).await.unwrap();

    let err = gate.authenticate(Some(&header)).await.unwrap_err();
    assert_eq!(err, Unauthenticated::Revoked);
    assert_eq!(err.reason(), "revoked");
}

#[tokio::test]
async fn test_ledger_outage_fails_closed() {
    let gate = gate_with(Arc::new(FailingRevocationRepository::new()));
    let issued = gate.signer().issue("u1", "a@x.com", Role::Viewer).unwrap();

    let err = gate
        .authenticate(Some(&bearer(&issued.token)))
        .await
        .unwrap_err();
    assert!(matches!(err, Unauthenticated::LedgerUnavailable(_)));
    assert_eq!(err.public_message(), "invalid or expired token");
}

#[tokio::test]
async fn test_forged_token_skips_ledger() {
    // A failing ledger would turn any lookup into LedgerUnavailable.
    let gate = gate_with(Arc::new(FailingRevocationRepository::new()));

    let err = gate.authenticate(Some("Bearer abc.def")).await.unwrap_err();
    assert_eq!(err, Unauthenticated::Invalid(TokenError::MalformedToken));
}

#[tokio::test]
async fn test_dyn_repository_gate() {
    let repo: Arc<dyn RevocationRepository> = Arc::new(InMemoryRevocationRepository::new());
    let gate = gate_with(repo);
    let issued = gate.signer().issue("u2", "b@x.com", Role::Viewer).unwrap();

    let identity = gate.authenticate_token(&issued.token).await.unwrap();
    assert_eq!(identity.subject, "u2");
}
