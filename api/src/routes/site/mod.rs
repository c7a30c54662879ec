pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

pub fn members_routes() -> Router<AppState> {
    Router::new().route("/", get(get::list_members))
}

pub fn projects_routes() -> Router<AppState> {
    Router::new().route("/", get(get::list_projects))
}
