use actix_web::{web, HttpResponse};
use tg_shared::types::HealthResponse;

use crate::app::AppState;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "tokengate-api";

/// Handler for GET /health
///
/// Reports unhealthy (503) while the revocation ledger cannot be reached,
/// since every authenticated request fails closed in that state.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let version = env!("CARGO_PKG_VERSION");

    match state.ledger().health_check().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, version)),
        Err(e) => {
            log::warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable()
                .json(HealthResponse::unhealthy(SERVICE_NAME, version))
        }
    }
}
