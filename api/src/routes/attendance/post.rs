//! # Attendance Recording Routes
//!
//! - `POST /api/attendance`: Upsert one status for a (student, day) pair
//! - `POST /api/attendance/bulk`: Upsert a batch with per-entry error isolation
//!
//! All routes require admin privileges.

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use db::models::attendance_record::{Model as AttendanceRecord, Status};
use db::models::student::Model as Student;
use sea_orm::DatabaseConnection;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::attendance::common::{
    AttendanceRecordResponse, BulkAttendanceEntry, BulkAttendanceOutcome, BulkAttendanceRequest,
    BulkEntryError, RecordAttendanceRequest, parse_day,
};

/// POST /api/attendance
///
/// Records one status for a student on a calendar day. Re-submitting for the
/// same (student, day) overwrites status/notes/marked-by instead of creating
/// a duplicate.
///
/// ### Request Body
/// ```json
/// { "student_id": 3, "date": "2024-06-01", "status": "present", "notes": "" }
/// ```
///
/// ### Responses
/// - `201 Created` — upserted record with the student populated
/// - `400 Bad Request` — missing fields or invalid status/date
/// - `404 Not Found` — unknown student
pub async fn record_attendance(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<RecordAttendanceRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let (Some(student_id), Some(date_raw), Some(status_raw)) =
        (req.student_id, req.date.as_deref(), req.status.as_deref())
    else {
        return bad_request("Student ID, date, and status are required");
    };

    let Some(date) = parse_day(date_raw) else {
        return bad_request("Date must be a valid calendar day (YYYY-MM-DD)");
    };

    let Ok(status) = status_raw.parse::<Status>() else {
        return bad_request("Status must be present, absent, or late");
    };

    match upsert_entry(db, student_id, date, status, req.notes, &claims.sub).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                record,
                "Attendance recorded successfully",
            )),
        )
            .into_response(),
        Err(EntryError::StudentNotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<BulkAttendanceOutcome>::error(
                "Student not found",
            )),
        )
            .into_response(),
        Err(EntryError::Storage(e)) => {
            tracing::error!(error = %e, student_id, "failed to record attendance");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<BulkAttendanceOutcome>::error(
                    "Internal server error",
                )),
            )
                .into_response()
        }
    }
}

/// POST /api/attendance/bulk
///
/// Applies the single-record upsert to every entry of a batch, collecting
/// per-entry failures instead of aborting. The envelope is always 200-class:
/// callers inspect `successful` / `failed` and the detail lists. Submitting
/// N entries yields exactly N outcomes.
///
/// ### Request Body
/// ```json
/// {
///   "date": "2024-06-01",
///   "records": [
///     { "student_id": 3, "status": "present" },
///     { "student_id": 4, "status": "absent", "notes": "sick" }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `200 OK` — `{ successful, failed, results[], errors[] }`
/// - `400 Bad Request` — missing/invalid date or missing records array
pub async fn bulk_record_attendance(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<BulkAttendanceRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let (Some(date_raw), Some(records)) = (req.date.as_deref(), req.records) else {
        return bad_request("Date and attendance records array are required");
    };

    let Some(date) = parse_day(date_raw) else {
        return bad_request("Date must be a valid calendar day (YYYY-MM-DD)");
    };

    let mut outcome = BulkAttendanceOutcome::default();

    // Entries are independent transactions: one failure never blocks the
    // rest, and nothing is rolled back across entries.
    for entry in records {
        match process_entry(db, date, &entry, &claims.sub).await {
            Ok(record) => outcome.results.push(record),
            Err(error) => outcome.errors.push(BulkEntryError {
                student_id: entry.student_id,
                error,
            }),
        }
    }

    outcome.successful = outcome.results.len();
    outcome.failed = outcome.errors.len();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            outcome,
            "Bulk attendance processing completed",
        )),
    )
        .into_response()
}

async fn process_entry(
    db: &DatabaseConnection,
    date: NaiveDate,
    entry: &BulkAttendanceEntry,
    admin_email: &str,
) -> Result<AttendanceRecordResponse, String> {
    let (Some(student_id), Some(status_raw)) = (entry.student_id, entry.status.as_deref()) else {
        return Err("Student ID and status are required".into());
    };

    let Ok(status) = status_raw.parse::<Status>() else {
        return Err("Invalid status".into());
    };

    match upsert_entry(db, student_id, date, status, entry.notes.clone(), admin_email).await {
        Ok(record) => Ok(record),
        Err(EntryError::StudentNotFound) => Err("Student not found".into()),
        Err(EntryError::Storage(e)) => {
            tracing::error!(error = %e, student_id, "bulk attendance entry failed");
            Err("Failed to record attendance".into())
        }
    }
}

enum EntryError {
    StudentNotFound,
    Storage(String),
}

async fn upsert_entry(
    db: &DatabaseConnection,
    student_id: i64,
    date: NaiveDate,
    status: Status,
    notes: Option<String>,
    admin_email: &str,
) -> Result<AttendanceRecordResponse, EntryError> {
    let student = Student::find_by_id(db, student_id)
        .await
        .map_err(|e| EntryError::Storage(e.to_string()))?
        .ok_or(EntryError::StudentNotFound)?;

    let record = AttendanceRecord::upsert(db, student.id, date, status, notes, admin_email)
        .await
        .map_err(|e| EntryError::Storage(e.to_string()))?;

    Ok(AttendanceRecordResponse::from_joined(record, Some(student)))
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<BulkAttendanceOutcome>::error(message)),
    )
        .into_response()
}
