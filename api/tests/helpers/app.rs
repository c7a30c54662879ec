#![allow(dead_code)]

use api::routes::routes;
use axum::{
    Router,
    body::Body,
    http::{Method, Request},
    response::Response,
};
use serde_json::Value;
use tower::ServiceExt;
use util::{config, state::AppState};

/// Builds the full `/api` router over a fresh in-memory database.
///
/// Every test gets its own database, so tests are isolated without needing
/// to run serially.
pub async fn make_test_app() -> (Router, AppState) {
    let db = db::test_utils::setup_test_db().await;
    let app_state = AppState::new(db);
    let router = Router::new().nest("/api", routes(app_state.clone()));
    (router, app_state)
}

/// A valid admin bearer token for the configured admin identity.
pub fn admin_token() -> String {
    api::auth::generate_jwt(&config::admin_email()).0
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
