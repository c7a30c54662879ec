use db::models::student::{Model as StudentModel, StudentAttrs};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for admin-path create and update.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct StudentPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub email: Option<String>,
    pub github_username: Option<String>,
    pub student_id: Option<String>,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub year: Option<String>,
    pub area_of_study: Option<String>,
}

impl From<StudentPayload> for StudentAttrs {
    fn from(p: StudentPayload) -> Self {
        Self {
            name: p.name,
            email: p.email,
            github_username: p.github_username,
            student_id: p.student_id,
            phone: p.phone,
            course: p.course,
            year: p.year,
            area_of_study: p.area_of_study,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub github_username: Option<String>,
    pub student_id: Option<String>,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub year: Option<String>,
    pub area_of_study: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub registration_type: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<StudentModel> for StudentResponse {
    fn from(s: StudentModel) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            github_username: s.github_username,
            student_id: s.student_id,
            phone: s.phone,
            course: s.course,
            year: s.year,
            area_of_study: s.area_of_study,
            is_active: s.is_active,
            is_verified: s.is_verified,
            registration_type: s.registration_type.to_string(),
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}
