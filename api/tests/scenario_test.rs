//! End-to-end walk through the admin's daily flow: suggest a code, create
//! the student with it, record attendance, correct it through the bulk
//! endpoint, and read the day back.

mod helpers;

use axum::http::{Method, StatusCode};
use helpers::app::{admin_token, get_json_body, make_test_app, request, send};
use serde_json::json;

#[tokio::test]
async fn roster_and_ledger_round_trip() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    // Suggested code on an empty roster is the first in sequence.
    let response = send(
        &app,
        request(Method::GET, "/api/students/next-id", Some(&token), None),
    )
    .await;
    let next_id = get_json_body(response).await["data"]["next_id"]
        .as_str()
        .unwrap()
        .to_owned();
    assert_eq!(next_id, "PGS001");

    // Create Jane with the suggested code.
    let response = send(
        &app,
        request(
            Method::POST,
            "/api/students",
            Some(&token),
            Some(json!({ "name": "Jane", "student_id": next_id })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let jane = get_json_body(response).await["data"]["id"].as_i64().unwrap();

    // Mark her present on June 1st.
    let response = send(
        &app,
        request(
            Method::POST,
            "/api/attendance",
            Some(&token),
            Some(json!({
                "student_id": jane,
                "date": "2024-06-01",
                "status": "present",
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The bulk correction for the same day overwrites, not duplicates.
    let response = send(
        &app,
        request(
            Method::POST,
            "/api/attendance/bulk",
            Some(&token),
            Some(json!({
                "date": "2024-06-01",
                "records": [
                    { "student_id": jane, "status": "absent", "notes": "sick" },
                ],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["successful"], 1);
    assert_eq!(json["data"]["failed"], 0);

    // Exactly one record for the day, carrying the latest status.
    let response = send(
        &app,
        request(
            Method::GET,
            "/api/attendance?date=2024-06-01",
            Some(&token),
            None,
        ),
    )
    .await;
    let json = get_json_body(response).await;
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], "absent");
    assert_eq!(records[0]["student"]["student_id"], "PGS001");
}
