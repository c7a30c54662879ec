pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_students))
        .route("/", post(post::create_student))
        .route("/next-id", get(get::next_student_id))
        .route("/verify", post(post::verify_student))
        .route("/{id}", put(put::update_student))
        .route("/{id}", delete(delete::delete_student))
}
