pub mod m202602090001_create_students;
pub mod m202602090002_create_attendance_records;
