mod helpers;

use axum::http::{Method, StatusCode};
use helpers::app::{admin_token, get_json_body, make_test_app, request, send};
use serde_json::{Value, json};

fn registration(name: &str, email: &str, github: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "github_username": github,
        "year": "2",
        "area_of_study": "Systems",
    })
}

async fn register(app: &axum::Router, body: Value) -> (StatusCode, Value) {
    let response = send(app, request(Method::POST, "/api/register", None, Some(body))).await;
    let status = response.status();
    (status, get_json_body(response).await)
}

async fn pending_ids(app: &axum::Router, token: &str) -> Vec<(i64, bool)> {
    let response = send(
        app,
        request(
            Method::GET,
            "/api/students?include_unverified=true",
            Some(token),
            None,
        ),
    )
    .await;
    let json = get_json_body(response).await;
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["id"].as_i64().unwrap(),
                s["is_verified"].as_bool().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn self_registration_is_pending_until_reviewed() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    let (status, json) = register(&app, registration("Jane", "jane@example.com", "janedoe")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["email"], "jane@example.com");

    // Not in the verified listing...
    let response = send(
        &app,
        request(Method::GET, "/api/students", Some(&token), None),
    )
    .await;
    let json = get_json_body(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    // ...but visible to the review screen.
    let rows = pending_ids(&app, &token).await;
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].1);
}

#[tokio::test]
async fn registration_validates_every_field() {
    let (app, _state) = make_test_app().await;

    let (status, json) = register(
        &app,
        json!({ "name": "Jane", "email": "jane@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "All fields are required");

    let (status, json) = register(&app, registration("Jane", "not-an-email", "janedoe")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid email format");

    let (status, json) = register(&app, registration("Jane", "jane@example.com", "@janedoe")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid GitHub username format");

    let (status, json) =
        register(&app, registration("Jane", "jane@example.com", "jane doe")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid GitHub username format");
}

#[tokio::test]
async fn duplicate_email_conflicts_until_the_holder_is_rejected() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    let (status, _) = register(&app, registration("Jane", "jane@example.com", "janedoe")).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same email (case-insensitive) collides while the holder is active.
    let (status, json) = register(&app, registration("Other", "JANE@example.com", "other")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "A student with this email already exists");

    // Same GitHub username collides too, named as such.
    let (status, json) = register(&app, registration("Other", "other@example.com", "janedoe")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "A student with this GitHub username already exists"
    );

    // Rejecting the pending registration frees both.
    let id = pending_ids(&app, &token).await[0].0;
    let response = send(
        &app,
        request(
            Method::POST,
            "/api/students/verify",
            Some(&token),
            Some(json!({ "student_id": id, "action": "reject" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _) = register(&app, registration("Jane", "jane@example.com", "janedoe")).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn approval_assigns_a_code_and_is_terminal() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    register(&app, registration("Jane", "jane@example.com", "janedoe")).await;
    let id = pending_ids(&app, &token).await[0].0;

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/students/verify",
            Some(&token),
            Some(json!({
                "student_id": id,
                "action": "approve",
                "student_id_to_assign": "PGS004",
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["student_id"], "PGS004");
    assert_eq!(json["data"]["is_verified"], true);

    // Now part of the verified listing.
    let response = send(
        &app,
        request(Method::GET, "/api/students", Some(&token), None),
    )
    .await;
    let json = get_json_body(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // A second review of the same registration is rejected.
    let response = send(
        &app,
        request(
            Method::POST,
            "/api/students/verify",
            Some(&token),
            Some(json!({ "student_id": id, "action": "approve" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn approval_with_taken_code_leaves_registration_pending() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    // An active student already holds PGS001.
    let response = send(
        &app,
        request(
            Method::POST,
            "/api/students",
            Some(&token),
            Some(json!({ "name": "Holder", "student_id": "PGS001" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    register(&app, registration("Jane", "jane@example.com", "janedoe")).await;
    let (id, _) = *pending_ids(&app, &token)
        .await
        .iter()
        .find(|(_, verified)| !*verified)
        .unwrap();

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/students/verify",
            Some(&token),
            Some(json!({
                "student_id": id,
                "action": "approve",
                "student_id_to_assign": "PGS001",
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Student ID already exists");

    // Still pending: the failed approval wrote nothing.
    let rows = pending_ids(&app, &token).await;
    let (_, verified) = rows.iter().find(|(row_id, _)| *row_id == id).unwrap();
    assert!(!*verified);
}

#[tokio::test]
async fn verify_validates_action_and_id() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/students/verify",
            Some(&token),
            Some(json!({ "student_id": 1 })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/students/verify",
            Some(&token),
            Some(json!({ "student_id": 1, "action": "promote" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/students/verify",
            Some(&token),
            Some(json!({ "student_id": 999, "action": "approve" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
