//! Read-side aggregation over the attendance ledger.
//!
//! Everything here is a pure function over an already-materialized list of
//! joined (record, student) rows. Filtering is deliberately done in memory
//! rather than pushed to storage: the report screens slice one fetched data
//! set many ways.

use chrono::NaiveDate;
use db::models::attendance_record::{Model as AttendanceModel, Status};
use db::models::student::Model as StudentModel;
use serde::Serialize;

pub type JoinedRecord = (AttendanceModel, Option<StudentModel>);

/// Conjunctive (AND) filters. Date bounds are inclusive.
#[derive(Debug, Default, Clone)]
pub struct ReportFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub student_id: Option<i64>,
    pub status: Option<Status>,
}

pub fn filter_records(rows: Vec<JoinedRecord>, filters: &ReportFilters) -> Vec<JoinedRecord> {
    rows.into_iter()
        .filter(|(record, _)| {
            if let Some(start) = filters.start_date {
                if record.date < start {
                    return false;
                }
            }
            if let Some(end) = filters.end_date {
                if record.date > end {
                    return false;
                }
            }
            if let Some(student_id) = filters.student_id {
                if record.student_id != student_id {
                    return false;
                }
            }
            if let Some(status) = filters.status {
                if record.status != status {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Counts by status plus each status's integer share of the total.
#[derive(Debug, Serialize, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub present_pct: u32,
    pub absent_pct: u32,
    pub late_pct: u32,
}

pub fn status_breakdown(rows: &[JoinedRecord]) -> StatusBreakdown {
    let total = rows.len();
    let count = |wanted: Status| rows.iter().filter(|(r, _)| r.status == wanted).count();

    let present = count(Status::Present);
    let absent = count(Status::Absent);
    let late = count(Status::Late);

    StatusBreakdown {
        total,
        present,
        absent,
        late,
        present_pct: percentage(present, total),
        absent_pct: percentage(absent, total),
        late_pct: percentage(late, total),
    }
}

/// Rounded to the nearest integer percent; an empty set is 0%, not a
/// division error.
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// One flat row of the export projection.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ExportRow {
    pub date: String,
    pub student_name: String,
    pub student_id: String,
    pub status: String,
    pub notes: String,
}

pub fn export_rows(rows: &[JoinedRecord]) -> Vec<ExportRow> {
    rows.iter()
        .map(|(record, student)| ExportRow {
            date: record.date.to_string(),
            student_name: student
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            student_id: student
                .as_ref()
                .and_then(|s| s.student_id.clone())
                .unwrap_or_default(),
            status: record.status.to_string(),
            notes: record.notes.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from("Date,Student Name,Student ID,Status,Notes\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_field(&row.date),
            csv_field(&row.student_name),
            csv_field(&row.student_id),
            csv_field(&row.status),
            csv_field(&row.notes),
        ));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use db::models::student::RegistrationType;

    fn record(id: i64, student_id: i64, date: &str, status: Status) -> JoinedRecord {
        let now = Utc::now();
        (
            AttendanceModel {
                id,
                student_id,
                date: date.parse().unwrap(),
                status,
                notes: None,
                marked_by: "admin@club.local".into(),
                created_at: now,
                updated_at: now,
            },
            Some(StudentModel {
                id: student_id,
                name: format!("Student {student_id}"),
                email: None,
                github_username: None,
                student_id: Some(format!("PGS{student_id:03}")),
                phone: None,
                course: None,
                year: None,
                area_of_study: None,
                is_active: true,
                is_verified: true,
                registration_type: RegistrationType::Admin,
                created_at: now,
                updated_at: now,
            }),
        )
    }

    #[test]
    fn empty_set_yields_zero_percentages() {
        let breakdown = status_breakdown(&[]);
        assert_eq!(breakdown.total, 0);
        assert_eq!(breakdown.present_pct, 0);
        assert_eq!(breakdown.absent_pct, 0);
        assert_eq!(breakdown.late_pct, 0);
    }

    #[test]
    fn percentages_round_to_nearest_integer() {
        let rows = vec![
            record(1, 1, "2024-06-01", Status::Present),
            record(2, 2, "2024-06-01", Status::Present),
            record(3, 3, "2024-06-01", Status::Late),
        ];

        let breakdown = status_breakdown(&rows);
        assert_eq!(breakdown.total, 3);
        assert_eq!(breakdown.present, 2);
        assert_eq!(breakdown.present_pct, 67);
        assert_eq!(breakdown.late_pct, 33);
        assert_eq!(breakdown.absent_pct, 0);
    }

    #[test]
    fn filters_are_conjunctive_and_inclusive() {
        let rows = vec![
            record(1, 1, "2024-06-01", Status::Present),
            record(2, 1, "2024-06-03", Status::Absent),
            record(3, 2, "2024-06-03", Status::Absent),
            record(4, 1, "2024-06-05", Status::Absent),
        ];

        let filters = ReportFilters {
            start_date: Some("2024-06-01".parse().unwrap()),
            end_date: Some("2024-06-03".parse().unwrap()),
            student_id: Some(1),
            status: Some(Status::Absent),
        };

        let filtered = filter_records(rows, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].0.id, 2);
    }

    #[test]
    fn csv_escapes_embedded_commas_and_quotes() {
        let mut rows = vec![record(1, 1, "2024-06-01", Status::Present)];
        rows[0].0.notes = Some("left early, said \"sorry\"".into());

        let csv = to_csv(&export_rows(&rows));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Student Name,Student ID,Status,Notes");
        assert!(lines[1].ends_with("present,\"left early, said \"\"sorry\"\"\""));
    }

    #[test]
    fn export_tolerates_missing_student_join() {
        let mut rows = vec![record(1, 9, "2024-06-01", Status::Late)];
        rows[0].1 = None;

        let exported = export_rows(&rows);
        assert_eq!(exported[0].student_name, "");
        assert_eq!(exported[0].student_id, "");
        assert_eq!(exported[0].status, "late");
    }
}
