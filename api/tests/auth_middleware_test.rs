//! Integration tests for the bearer authentication middleware

mod common;

use actix_web::{body::MessageBody, dev::ServiceResponse, http::header, test};
use chrono::{Duration, Utc};
use serde_json::Value;

use tg_api::create_app;
use tg_core::services::token::{TokenSigner, SEPARATOR};
use tg_core::Role;

use common::{bearer, failing_state, memory_state};

async fn assert_unauthenticated(resp: ServiceResponse<impl MessageBody>, message: &str) {
    assert_eq!(resp.status(), 401);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthenticated");
    assert_eq!(body["message"], message);
}

#[actix_web::test]
async fn test_me_returns_identity() {
    let (state, _) = memory_state();
    let issued = state.signer().issue("u1", "a@x.com", Role::Admin).unwrap();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header((header::AUTHORIZATION, bearer(&issued.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["subject"], "u1");
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "admin");
}

#[actix_web::test]
async fn test_missing_header() {
    let (state, _) = memory_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_unauthenticated(resp, "missing credential").await;
}

#[actix_web::test]
async fn test_non_bearer_scheme_is_missing_credential() {
    let (state, _) = memory_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_unauthenticated(resp, "missing credential").await;
}

#[actix_web::test]
async fn test_every_bad_token_gets_same_response() {
    let (state, _) = memory_state();
    let signer = state.signer().clone();
    let app = test::init_service(create_app(state)).await;

    let valid = signer.issue("u1", "a@x.com", Role::Viewer).unwrap();
    let (payload, _) = valid.token.split_once(SEPARATOR).unwrap();
    let bad_signature = format!("{}{}{}", payload, SEPARATOR, "0".repeat(64));
    let expired = signer
        .issue_at(
            "u1",
            "a@x.com",
            Role::Viewer,
            Duration::hours(1),
            Utc::now() - Duration::days(1),
        )
        .unwrap()
        .token;
    let foreign = TokenSigner::with_secret("other-secret")
        .unwrap()
        .issue("u1", "a@x.com", Role::Admin)
        .unwrap()
        .token;

    let tokens = [
        "garbage",
        "a.b.c",
        bad_signature.as_str(),
        expired.as_str(),
        foreign.as_str(),
    ];
    for token in tokens {
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header((header::AUTHORIZATION, bearer(token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_unauthenticated(resp, "invalid or expired token").await;
    }
}

#[actix_web::test]
async fn test_ledger_outage_fails_closed() {
    let state = failing_state();
    let issued = state.signer().issue("u1", "a@x.com", Role::Viewer).unwrap();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header((header::AUTHORIZATION, bearer(&issued.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_unauthenticated(resp, "invalid or expired token").await;
}

#[actix_web::test]
async fn test_health_is_public() {
    let (state, _) = memory_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "tokengate-api");
}

#[actix_web::test]
async fn test_health_reports_unreachable_ledger() {
    let app = test::init_service(create_app(failing_state())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 503);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
}

#[actix_web::test]
async fn test_unknown_route_is_json_404() {
    let (state, _) = memory_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
