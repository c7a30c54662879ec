use crate::response::ApiResponse;
use crate::routes::common::roster_error;
use crate::routes::students::common::{StudentPayload, StudentResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::student::Model as Student;
use util::state::AppState;
use validator::Validate;

/// PUT /api/students/{id}
///
/// Replaces the editable attributes of an existing student. A changed
/// `student_id` is re-checked for uniqueness excluding the row itself.
///
/// ### Responses
/// - `200 OK` — updated student
/// - `400 Bad Request` — missing name or duplicate student ID
/// - `404 Not Found` — unknown id
pub async fn update_student(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<StudentPayload>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StudentResponse>::error(
                common::format_validation_errors(&e),
            )),
        )
            .into_response();
    }
    if req.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StudentResponse>::error("Name is required")),
        )
            .into_response();
    }

    match Student::update(app_state.db(), id, req.into()).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::<StudentResponse>::success(
                student.into(),
                "Student updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            let (status, message) = roster_error(e);
            (status, Json(ApiResponse::<StudentResponse>::error(message))).into_response()
        }
    }
}
