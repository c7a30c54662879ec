//! HTTP route entry point for `/api/...`.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Admin login (public)
//! - `/register` → Self-service registration (public)
//! - `/students` → Roster directory and registration review (admin-only)
//! - `/attendance` → Attendance ledger (admin-only)
//! - `/reports` → Read-side aggregation over the ledger (admin-only)
//! - `/members`, `/projects` → Public site data backed by the GitHub API

use crate::auth::guards::allow_admin;
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod attendance;
pub mod auth;
pub mod common;
pub mod health;
pub mod register;
pub mod reports;
pub mod site;
pub mod students;

/// Builds the complete application router for all HTTP endpoints.
///
/// The admin-only groups share a single `allow_admin` route layer; everything
/// else is public.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest("/register", register::register_routes())
        .nest(
            "/students",
            students::students_routes().route_layer(from_fn(allow_admin)),
        )
        .nest(
            "/attendance",
            attendance::attendance_routes().route_layer(from_fn(allow_admin)),
        )
        .nest(
            "/reports",
            reports::reports_routes().route_layer(from_fn(allow_admin)),
        )
        .nest("/members", site::members_routes())
        .nest("/projects", site::projects_routes())
        .with_state(app_state)
}
