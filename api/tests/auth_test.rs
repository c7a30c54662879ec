mod helpers;

use axum::http::{Method, StatusCode};
use helpers::app::{admin_token, get_json_body, make_test_app, request, send};
use serde_json::json;
use util::config;

#[tokio::test]
async fn health_is_public() {
    let (app, _state) = make_test_app().await;

    let response = send(&app, request(Method::GET, "/api/health", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn login_issues_token_and_cookie() {
    let (app, _state) = make_test_app().await;

    let body = json!({
        "email": config::admin_email(),
        "password": config::admin_password(),
    });
    let response = send(
        &app,
        request(Method::POST, "/api/auth/login", None, Some(body)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("login must set a cookie")
        .to_str()
        .unwrap()
        .to_owned();
    assert!(cookie.starts_with("admin-token="));
    assert!(cookie.contains("HttpOnly"));

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    let token = json["data"]["token"].as_str().unwrap().to_owned();

    // The issued token is accepted on an admin route.
    let response = send(
        &app,
        request(Method::GET, "/api/students", Some(&token), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let (app, _state) = make_test_app().await;

    let body = json!({
        "email": config::admin_email(),
        "password": "definitely-wrong",
    });
    let response = send(
        &app,
        request(Method::POST, "/api/auth/login", None, Some(body)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": config::admin_email() })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_routes_reject_missing_and_garbage_tokens() {
    let (app, _state) = make_test_app().await;

    let response = send(&app, request(Method::GET, "/api/students", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        request(Method::GET, "/api/students", Some("not-a-jwt"), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        request(Method::GET, "/api/attendance", None, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_is_accepted_from_the_cookie() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    let req = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/students")
        .header("Cookie", format!("admin-token={token}"))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = send(&app, req).await;
    assert_eq!(response.status(), StatusCode::OK);
}
