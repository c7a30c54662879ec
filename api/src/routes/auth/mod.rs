pub mod post;

use axum::{Router, routing::post};
use util::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(post::login))
}
