//! # Student Creation & Registration Review Routes
//!
//! - `POST /api/students`: Create a single student (immediately verified)
//! - `POST /api/students/verify`: Approve or reject a pending self-registration
//!
//! All routes require admin privileges.

use crate::response::ApiResponse;
use crate::routes::common::roster_error;
use crate::routes::students::common::{StudentPayload, StudentResponse};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::student::Model as Student;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

/// POST /api/students
///
/// Creates a student on the admin path: the row is active and verified from
/// the start. A supplied `student_id` is trimmed and must be free among
/// active rows.
///
/// ### Responses
/// - `201 Created` — full student object
/// - `400 Bad Request` — missing name, or duplicate student ID
/// - `401 Unauthorized` — missing or invalid token
pub async fn create_student(
    State(app_state): State<AppState>,
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

    match Student::create(app_state.db(), req.into()).await {
        Ok(student) => (
            StatusCode::CREATED,
            Json(ApiResponse::<StudentResponse>::success(
                student.into(),
                "Student created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            let (status, message) = roster_error(e);
            (status, Json(ApiResponse::<StudentResponse>::error(message))).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Internal id of the pending registration.
    pub student_id: Option<i64>,
    pub action: Option<String>,
    /// Optional code to assign on approval.
    pub student_id_to_assign: Option<String>,
}

/// POST /api/students/verify
///
/// Reviews a pending self-registration. `approve` verifies the row
/// (optionally assigning a code); `reject` soft-deletes it, freeing its
/// email and GitHub username. Both transitions are terminal and only valid
/// from the pending state.
///
/// ### Request Body
/// ```json
/// { "student_id": 7, "action": "approve", "student_id_to_assign": "PGS004" }
/// ```
///
/// ### Responses
/// - `200 OK` — updated student (approve) or rejection confirmation
/// - `400 Bad Request` — missing fields, bad action, non-pending row, or
///   duplicate assigned ID (row stays pending)
/// - `404 Not Found` — unknown id
pub async fn verify_student(
    State(app_state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> impl IntoResponse {
    let (Some(id), Some(action)) = (req.student_id, req.action.as_deref()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StudentResponse>::error(
                "Student ID and action are required",
            )),
        )
            .into_response();
    };

    let db = app_state.db();
    match action {
        "approve" => match Student::approve(db, id, req.student_id_to_assign).await {
            Ok(student) => (
                StatusCode::OK,
                Json(ApiResponse::<StudentResponse>::success(
                    student.into(),
                    "Student approved successfully",
                )),
            )
                .into_response(),
            Err(e) => {
                let (status, message) = roster_error(e);
                (status, Json(ApiResponse::<StudentResponse>::error(message))).into_response()
            }
        },
        "reject" => match Student::reject(db, id).await {
            Ok(()) => (
                StatusCode::OK,
                Json(ApiResponse::success((), "Student registration rejected")),
            )
                .into_response(),
            Err(e) => {
                let (status, message) = roster_error(e);
                (status, Json(ApiResponse::<()>::error(message))).into_response()
            }
        },
        _ => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StudentResponse>::error(
                "Invalid action. Must be approve or reject",
            )),
        )
            .into_response(),
    }
}
