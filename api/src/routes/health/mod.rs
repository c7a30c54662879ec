pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(get::health))
}
