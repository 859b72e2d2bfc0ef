use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{RevokeRequest, RevokeResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /internal/revocations
///
/// Revokes an arbitrary token by value, for services that need to
/// force-expire a credential they did not receive over the wire. The
/// signature is not checked: only trusted callers reach this route, and
/// revoking a forged token only blocks that forgery.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: The token could not be decoded
/// - 403 Forbidden: Missing or wrong internal key
/// - 503 Service Unavailable: The revocation could not be recorded
pub async fn revoke_token(
    state: web::Data<AppState>,
    request: web::Json<RevokeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let record = state.ledger().revoke(&request.token).await?;

    log::info!(
        "Token revoked by internal call (fingerprint {})",
        record.fingerprint.short()
    );

    Ok(HttpResponse::Ok().json(RevokeResponse {
        revoked: true,
        expires_at: record.expires_at,
    }))
}
