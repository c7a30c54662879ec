pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

pub fn reports_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::attendance_report))
        .route("/export", get(get::export_report))
}
