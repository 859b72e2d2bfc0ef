//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use actix_web::web;
use std::sync::Arc;

use tg_api::AppState;
use tg_core::repositories::{
    FailingRevocationRepository, InMemoryRevocationRepository, RevocationRepository,
};
use tg_core::services::{SchedulerConfig, TokenSigner};
use tg_shared::config::Secret;

pub const TEST_SECRET: &str = "api-test-secret";
pub const INTERNAL_KEY: &str = "internal-test-key";

pub fn state_with(
    repository: Arc<dyn RevocationRepository>,
    internal_key: Option<&str>,
) -> web::Data<AppState> {
    web::Data::new(AppState::new(
        TokenSigner::with_secret(TEST_SECRET).unwrap(),
        repository,
        SchedulerConfig::default(),
        internal_key.map(Secret::new),
    ))
}

pub fn memory_state() -> (web::Data<AppState>, Arc<InMemoryRevocationRepository>) {
    let repo = Arc::new(InMemoryRevocationRepository::new());
    (state_with(repo.clone(), Some(INTERNAL_KEY)), repo)
}

pub fn failing_state() -> web::Data<AppState> {
    state_with(Arc::new(FailingRevocationRepository::new()), Some(INTERNAL_KEY))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
