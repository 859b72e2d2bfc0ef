//! Bearer authentication middleware for protecting API endpoints.
//!
//! Runs the [`AuthGate`](tg_core::services::AuthGate) on the `Authorization`
//! header and injects the resulting [`AuthContext`] into the request.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    fmt,
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use tg_core::domain::entities::claim::{AuthenticatedIdentity, Role};
use tg_core::services::auth::{extract_bearer, Unauthenticated};

use crate::app::AppState;
use crate::handlers::error::ApiError;

/// Identity of an authenticated caller, injected into requests
#[derive(Clone)]
pub struct AuthContext {
    pub subject: String,
    pub email: String,
    pub role: Role,
    /// The bearer token exactly as presented, needed to revoke it on logout
    pub token: String,
}

impl AuthContext {
    pub fn new(identity: AuthenticatedIdentity, token: String) -> Self {
        Self {
            subject: identity.subject,
            email: identity.email,
            role: identity.role,
            token,
        }
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("subject", &self.subject)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Bearer authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerAuth;

impl BearerAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Bearer authentication middleware service
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| ApiError::Internal("application state missing".to_string()))?;

            let token = match bearer_token(&req) {
                Some(token) => token,
                None => {
                    log::debug!("No bearer credential on {}", req.path());
                    return Err(ApiError::from(Unauthenticated::MissingCredential).into());
                }
            };

            let identity = state.gate.authenticate_token(&token).await.map_err(|e| {
                log::warn!("Rejected request to {}: {}", req.path(), e.reason());
                ApiError::from(e)
            })?;

            req.extensions_mut().insert(AuthContext::new(identity, token));

            service.call(req).await
        })
    }
}

/// Extracts the bearer token from the Authorization header
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok();
    extract_bearer(header).map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(Unauthenticated::MissingCredential).into());

        ready(result)
    }
}
