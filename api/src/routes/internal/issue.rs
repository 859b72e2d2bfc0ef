use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use validator::Validate;

use tg_core::domain::entities::claim::Role;
use tg_core::services::auth::BEARER_SCHEME;

use crate::app::AppState;
use crate::dto::auth::{IssueTokenRequest, IssueTokenResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /internal/tokens
///
/// # Request Body
///
/// ```json
/// {
///     "subject": "u1",
///     "email": "a@x.com",
///     "role": "viewer",
///     "ttl_seconds": 3600
/// }
/// ```
///
/// `ttl_seconds` is optional.
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_at": 1700604800,
///     "expires_in": 604800
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid subject, email, role or lifetime
/// - 403 Forbidden: Missing or wrong internal key
pub async fn issue_token(
    state: web::Data<AppState>,
    request: web::Json<IssueTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let role: Role = request
        .role
        .parse()
        .map_err(|_| ApiError::Validation(format!("unknown role: {}", request.role)))?;

    let signer = state.signer();
    let ttl = request
        .ttl_seconds
        .map(Duration::seconds)
        .unwrap_or_else(|| signer.ttl());
    let now = Utc::now();

    let issued = signer.issue_at(&request.subject, &request.email, role, ttl, now)?;

    log::info!(
        "Issued {} token for subject {}",
        issued.claim.role,
        issued.claim.subject
    );

    Ok(HttpResponse::Created().json(IssueTokenResponse {
        expires_in: issued.claim.expires_at - now.timestamp(),
        expires_at: issued.claim.expires_at,
        token: issued.token,
        token_type: BEARER_SCHEME.to_string(),
    }))
}
