//! # Report Routes
//!
//! - `GET /api/reports`: filtered ledger slice plus status breakdown
//! - `GET /api/reports/export`: the same slice as a CSV download
//!
//! Filtering happens in memory over the full fetched ledger (see
//! `services::report`); both endpoints accept the same query parameters.

use crate::response::ApiResponse;
use crate::routes::attendance::common::{AttendanceRecordResponse, parse_day};
use crate::services::report::{
    ReportFilters, StatusBreakdown, export_rows, filter_records, status_breakdown, to_csv,
};
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use db::models::attendance_record::{Model as AttendanceRecord, Status};
use serde::{Deserialize, Serialize};
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub student_id: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct ReportResponse {
    pub records: Vec<AttendanceRecordResponse>,
    pub stats: StatusBreakdown,
}

enum QueryError {
    BadDate,
    BadStatus,
}

fn parse_filters(query: &ReportQuery) -> Result<ReportFilters, QueryError> {
    let parse = |raw: &Option<String>| match raw.as_deref() {
        Some(s) => parse_day(s).map(Some).ok_or(QueryError::BadDate),
        None => Ok(None),
    };

    let status = match query.status.as_deref() {
        Some(s) => Some(s.parse::<Status>().map_err(|_| QueryError::BadStatus)?),
        None => None,
    };

    Ok(ReportFilters {
        start_date: parse(&query.start_date)?,
        end_date: parse(&query.end_date)?,
        student_id: query.student_id,
        status,
    })
}

fn query_error_response(err: QueryError) -> axum::response::Response {
    let message = match err {
        QueryError::BadDate => "Dates must be valid calendar days (YYYY-MM-DD)",
        QueryError::BadStatus => "Status must be present, absent, or late",
    };
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<ReportResponse>::error(message)),
    )
        .into_response()
}

/// GET /api/reports
///
/// ### Query Parameters
/// - `start_date`, `end_date` (optional): inclusive day bounds
/// - `student_id` (optional): internal student id
/// - `status` (optional): present | absent | late
///
/// ### Responses
/// - `200 OK` — `{ records, stats }` where stats carries counts and integer
///   percentages per status (an empty slice reports 0% everywhere)
/// - `400 Bad Request` — malformed date or status filter
pub async fn attendance_report(
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let filters = match parse_filters(&query) {
        Ok(f) => f,
        Err(e) => return query_error_response(e),
    };

    let rows = match AttendanceRecord::find_filtered(app_state.db(), None, None).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "failed to load ledger for report");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ReportResponse>::error("Internal server error")),
            )
                .into_response();
        }
    };

    let filtered = filter_records(rows, &filters);
    let stats = status_breakdown(&filtered);
    let records = filtered
        .into_iter()
        .map(|(record, student)| AttendanceRecordResponse::from_joined(record, student))
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            ReportResponse { records, stats },
            "Report generated successfully",
        )),
    )
        .into_response()
}

/// GET /api/reports/export
///
/// Same filters as `GET /api/reports`; returns the flat projection
/// (date, student name, student ID, status, notes) as a CSV attachment.
pub async fn export_report(
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let filters = match parse_filters(&query) {
        Ok(f) => f,
        Err(e) => return query_error_response(e),
    };

    let rows = match AttendanceRecord::find_filtered(app_state.db(), None, None).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "failed to load ledger for export");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ReportResponse>::error("Internal server error")),
            )
                .into_response();
        }
    };

    let filtered = filter_records(rows, &filters);
    let csv = to_csv(&export_rows(&filtered));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"attendance-report.csv\"".to_owned(),
            ),
        ],
        csv,
    )
        .into_response()
}
