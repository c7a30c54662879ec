use crate::response::ApiResponse;
use crate::routes::students::common::StudentResponse;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::student::Model as Student;
use serde::{Deserialize, Serialize};
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListStudentsQuery {
    pub include_unverified: Option<bool>,
}

/// GET /api/students
///
/// Active roster, newest first. Admin-only.
///
/// ### Query Parameters
/// - `include_unverified` (optional): also return pending self-registrations,
///   for the review screen. Default `false`.
///
/// ### Responses
/// - `200 OK` — list of students
/// - `401 Unauthorized` — missing or invalid token
pub async fn list_students(
    State(app_state): State<AppState>,
    Query(query): Query<ListStudentsQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    match Student::list_active(db, query.include_unverified.unwrap_or(false)).await {
        Ok(students) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                students
                    .into_iter()
                    .map(StudentResponse::from)
                    .collect::<Vec<_>>(),
                "Students retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list students");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<StudentResponse>>::error(
                    "Internal server error",
                )),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct NextStudentIdResponse {
    pub next_id: String,
}

/// GET /api/students/next-id
///
/// Suggests the next code in the `PGS###` sequence. Advisory only — nothing
/// is reserved; the create-time uniqueness check is the real guard.
pub async fn next_student_id(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match Student::next_student_id(db).await {
        Ok(next_id) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                NextStudentIdResponse { next_id },
                "Next student ID generated",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to generate next student id");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<NextStudentIdResponse>::error(
                    "Internal server error",
                )),
            )
                .into_response()
        }
    }
}
