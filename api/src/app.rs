//! Application state and factory

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::{header, StatusCode},
    middleware::{DefaultHeaders, Logger},
    web, App, Error, HttpResponse,
};
use std::sync::Arc;

use tg_core::repositories::RevocationRepository;
use tg_core::services::{
    AuthGate, RevocationLedger, RevocationScheduler, SchedulerConfig, TokenSigner,
};
use tg_shared::config::Secret;

use crate::dto::error::{ErrorResponse, ErrorResponseExt};
use crate::handlers::error::ApiError;
use crate::middleware::{BearerAuth, InternalAuth};
use crate::routes;

/// Largest JSON body accepted by any route
const JSON_LIMIT: usize = 16 * 1024;

/// Shared services behind every handler.
///
/// The ledger backend is chosen at startup, so everything is held behind
/// `dyn RevocationRepository`.
pub struct AppState {
    pub gate: Arc<AuthGate<dyn RevocationRepository>>,
    pub scheduler: Arc<RevocationScheduler<dyn RevocationRepository>>,
    pub internal_key: Option<Secret>,
}

impl AppState {
    pub fn new(
        signer: TokenSigner,
        repository: Arc<dyn RevocationRepository>,
        scheduler: SchedulerConfig,
        internal_key: Option<Secret>,
    ) -> Self {
        let ledger = Arc::new(RevocationLedger::new(repository));
        Self {
            gate: Arc::new(AuthGate::new(Arc::new(signer), ledger.clone())),
            scheduler: Arc::new(RevocationScheduler::new(ledger, scheduler)),
            internal_key,
        }
    }

    pub fn signer(&self) -> &TokenSigner {
        self.gate.signer()
    }

    pub fn ledger(&self) -> &Arc<RevocationLedger<dyn RevocationRepository>> {
        self.gate.ledger()
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Responses carry identities and tokens; never cache them.
        .wrap(DefaultHeaders::new().add((header::CACHE_CONTROL, "no-store")))
        .wrap(Logger::default())
        .route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .wrap(BearerAuth::new())
                    .route("/logout", web::post().to(routes::auth::logout))
                    .route("/me", web::get().to(routes::auth::me)),
            ),
        )
        .service(
            web::scope("/internal")
                .wrap(InternalAuth::new())
                .route("/tokens", web::post().to(routes::internal::issue_token))
                .route("/revocations", web::post().to(routes::internal::revoke_token))
                .route("/cleanup", web::post().to(routes::internal::cleanup)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new("not_found", "The requested resource was not found")
        .to_response(StatusCode::NOT_FOUND)
}
