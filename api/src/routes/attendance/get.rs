use crate::response::ApiResponse;
use crate::routes::attendance::common::{AttendanceRecordResponse, parse_day};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::attendance_record::Model as AttendanceRecord;
use serde::Deserialize;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    /// Exact calendar day (`YYYY-MM-DD`).
    pub date: Option<String>,
    pub student_id: Option<i64>,
}

/// GET /api/attendance
///
/// Ledger history, student populated, sorted by date descending then
/// creation time descending. Both filters are optional and conjunctive.
///
/// ### Query Parameters
/// - `date` (optional): exact day filter
/// - `student_id` (optional): internal student id filter
///
/// ### Responses
/// - `200 OK` — list of records
/// - `400 Bad Request` — malformed date
/// - `401 Unauthorized` — missing or invalid token
pub async fn list_attendance(
    State(app_state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let date = match query.date.as_deref() {
        Some(raw) => match parse_day(raw) {
            Some(date) => Some(date),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<Vec<AttendanceRecordResponse>>::error(
                        "Date must be a valid calendar day (YYYY-MM-DD)",
                    )),
                )
                    .into_response();
            }
        },
        None => None,
    };

    match AttendanceRecord::find_filtered(db, date, query.student_id).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter()
                    .map(|(record, student)| {
                        AttendanceRecordResponse::from_joined(record, student)
                    })
                    .collect::<Vec<_>>(),
                "Attendance retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to query attendance");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<AttendanceRecordResponse>>::error(
                    "Internal server error",
                )),
            )
                .into_response()
        }
    }
}
