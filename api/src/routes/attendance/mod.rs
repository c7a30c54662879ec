pub mod common;
pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_attendance))
        .route("/", post(post::record_attendance))
        .route("/bulk", post(post::bulk_record_attendance))
}
