use crate::response::ApiResponse;
use crate::routes::common::roster_error;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::student::Model as Student;
use util::state::AppState;

/// DELETE /api/students/{id}
///
/// Soft delete: the row is marked inactive and drops out of listings and
/// uniqueness scopes. Attendance history keeps referencing it.
///
/// ### Responses
/// - `200 OK` — confirmation message
/// - `404 Not Found` — unknown id
pub async fn delete_student(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match Student::soft_delete(app_state.db(), id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Student deleted successfully")),
        )
            .into_response(),
        Err(e) => {
            let (status, message) = roster_error(e);
            (status, Json(ApiResponse::<()>::error(message))).into_response()
        }
    }
}
