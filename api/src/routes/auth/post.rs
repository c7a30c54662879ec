use axum::{
    Json,
    http::{StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use util::config;

use crate::auth::{extractors::AUTH_COOKIE, generate_jwt};
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
}

/// POST /api/auth/login
///
/// Authenticates the single configured admin and issues a JWT, both in the
/// response body and as an HttpOnly cookie.
///
/// ### Request Body
/// ```json
/// { "email": "admin@club.local", "password": "..." }
/// ```
///
/// ### Responses
/// - `200 OK` — token + expiry, `admin-token` cookie set
/// - `400 Bad Request` — missing email or password
/// - `401 Unauthorized` — credentials do not match
pub async fn login(Json(req): Json<LoginRequest>) -> impl IntoResponse {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(
                "Email and password are required",
            )),
        )
            .into_response();
    };

    if email != config::admin_email() || password != config::admin_password() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<LoginResponse>::error("Invalid credentials")),
        )
            .into_response();
    }

    let (token, expires_at) = generate_jwt(&email);
    let cookie = format!(
        "{AUTH_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        config::jwt_duration_minutes() * 60
    );

    (
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(ApiResponse::success(
            LoginResponse { token, expires_at },
            "Login successful",
        )),
    )
        .into_response()
}
