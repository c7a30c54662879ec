use chrono::{DateTime, NaiveDate};
use db::models::attendance_record::Model as AttendanceModel;
use db::models::student::Model as StudentModel;
use serde::{Deserialize, Serialize};

/// Parses a calendar day, accepting either a plain `YYYY-MM-DD` or an RFC
/// 3339 timestamp whose date part is used. Time-of-day never participates in
/// record identity.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// The slice of the student row callers need alongside a ledger entry.
#[derive(Debug, Serialize)]
pub struct StudentSummary {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
}

impl From<StudentModel> for StudentSummary {
    fn from(s: StudentModel) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            student_id: s.student_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceRecordResponse {
    pub id: i64,
    pub student: Option<StudentSummary>,
    pub date: String,
    pub status: String,
    pub notes: Option<String>,
    pub marked_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AttendanceRecordResponse {
    pub fn from_joined(record: AttendanceModel, student: Option<StudentModel>) -> Self {
        Self {
            id: record.id,
            student: student.map(StudentSummary::from),
            date: record.date.to_string(),
            status: record.status.to_string(),
            notes: record.notes,
            marked_by: record.marked_by,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordAttendanceRequest {
    pub student_id: Option<i64>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkAttendanceRequest {
    pub date: Option<String>,
    pub records: Option<Vec<BulkAttendanceEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct BulkAttendanceEntry {
    pub student_id: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkEntryError {
    pub student_id: Option<i64>,
    pub error: String,
}

/// Outcome of a bulk submission: every submitted entry lands in exactly one
/// of `results` or `errors`.
#[derive(Debug, Serialize, Default)]
pub struct BulkAttendanceOutcome {
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<AttendanceRecordResponse>,
    pub errors: Vec<BulkEntryError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_day_accepts_plain_dates_and_timestamps() {
        let date = parse_day("2024-06-01").unwrap();
        assert_eq!(date.to_string(), "2024-06-01");

        let from_ts = parse_day("2024-06-01T15:30:00Z").unwrap();
        assert_eq!(from_ts, date);

        assert!(parse_day("yesterday").is_none());
        assert!(parse_day("").is_none());
    }
}
