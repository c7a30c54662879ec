use crate::response::ApiResponse;
use axum::Json;
use util::config;

/// GET /api/health
///
/// Liveness probe used by deploy checks; always returns 200.
pub async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::success(
        (),
        format!("{} is up", config::project_name()),
    ))
}
