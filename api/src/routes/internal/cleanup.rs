use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::CleanupResponse;
use crate::handlers::error::ApiError;

/// Handler for POST /internal/cleanup
///
/// Runs one purge through the scheduler, so it never overlaps a scheduled
/// run.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "deleted": 12,
///     "ran_at": "2025-01-01T03:00:00Z",
///     "skipped": false
/// }
/// ```
pub async fn cleanup(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let report = state.scheduler.run_once().await?;

    log::info!(
        "Cleanup requested: deleted {} (skipped: {})",
        report.deleted,
        report.skipped
    );

    Ok(HttpResponse::Ok().json(CleanupResponse {
        deleted: report.deleted,
        ran_at: report.ran_at,
        skipped: report.skipped,
    }))
}
