use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::RosterError;
use db::models::student::Model as Student;
use serde::{Deserialize, Serialize};
use util::state::AppState;

use crate::response::ApiResponse;

lazy_static::lazy_static! {
    static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub github_username: Option<String>,
    pub year: Option<String>,
    pub area_of_study: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct RegistrationSummary {
    pub name: String,
    pub email: Option<String>,
    pub github_username: Option<String>,
    pub year: Option<String>,
    pub area_of_study: Option<String>,
}

/// POST /api/register
///
/// Public self-registration. Creates a pending roster entry awaiting admin
/// review; until then the student does not appear in the verified listing.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Jane Doe",
///   "email": "jane@example.com",
///   "github_username": "janedoe",
///   "year": "2",
///   "area_of_study": "Systems"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` — submission summary, pending verification
/// - `400 Bad Request` — missing field, malformed email or GitHub username,
///   or a duplicate email / GitHub username among active students
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let (Some(name), Some(email), Some(github_username), Some(year), Some(area_of_study)) = (
        non_blank(req.name),
        non_blank(req.email),
        non_blank(req.github_username),
        non_blank(req.year),
        non_blank(req.area_of_study),
    ) else {
        return bad_request("All fields are required");
    };

    if !EMAIL_REGEX.is_match(email.trim()) {
        return bad_request("Invalid email format");
    }

    if github_username.contains(' ') || github_username.contains('@') {
        return bad_request("Invalid GitHub username format");
    }

    match Student::create_self_registration(
        app_state.db(),
        &name,
        &email,
        &github_username,
        &year,
        &area_of_study,
    )
    .await
    {
        Ok(student) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                RegistrationSummary {
                    name: student.name,
                    email: student.email,
                    github_username: student.github_username,
                    year: student.year,
                    area_of_study: student.area_of_study,
                },
                "Registration submitted successfully. Pending admin verification.",
            )),
        )
            .into_response(),
        Err(RosterError::Conflict { field }) => {
            bad_request(&format!("A student with this {field} already exists"))
        }
        Err(e) => {
            tracing::error!(error = %e, "self-registration failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<RegistrationSummary>::error(
                    "Internal server error",
                )),
            )
                .into_response()
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<RegistrationSummary>::error(message)),
    )
        .into_response()
}
