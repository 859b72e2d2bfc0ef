//! Guard for service-to-service routes.
//!
//! Callers must present the configured key in `X-Internal-Key`. With no key
//! configured every internal call is refused.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error,
};
use constant_time_eq::constant_time_eq;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::app::AppState;
use crate::handlers::error::ApiError;

pub const INTERNAL_KEY_HEADER: &str = "X-Internal-Key";

/// Internal key middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct InternalAuth;

impl InternalAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for InternalAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = InternalAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(InternalAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct InternalAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for InternalAuthMiddleware<S>
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

            let expected = match state.internal_key.as_ref() {
                Some(key) if !key.is_empty() => key,
                _ => {
                    log::warn!("Internal call to {} refused: no internal key configured", req.path());
                    return Err(ApiError::Forbidden("internal access is not configured".to_string()).into());
                }
            };

            let presented = req
                .headers()
                .get(INTERNAL_KEY_HEADER)
                .map(|v| v.as_bytes())
                .unwrap_or_default();

            if !constant_time_eq(presented, expected.expose().as_bytes()) {
                log::warn!("Internal call to {} refused: bad internal key", req.path());
                return Err(ApiError::Forbidden("invalid internal key".to_string()).into());
            }

            service.call(req).await
        })
    }
}
