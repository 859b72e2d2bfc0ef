use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::LogoutResponse;
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the bearer token that authenticated this very request. The token
/// has already passed the gate, so it is known to be genuine and unexpired.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired or already revoked token
/// - 503 Service Unavailable: The revocation could not be recorded
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let record = state.ledger().revoke(&auth.token).await?;

    log::info!(
        "Subject {} logged out (fingerprint {})",
        auth.subject,
        record.fingerprint.short()
    );

    Ok(HttpResponse::Ok().json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
