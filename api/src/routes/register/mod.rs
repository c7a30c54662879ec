pub mod post;

use axum::{Router, routing::post};
use util::state::AppState;

pub fn register_routes() -> Router<AppState> {
    Router::new().route("/", post(post::register))
}
