//! integration tests for the attendance endpoints.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

mod common;

#[tokio::test]
async fn test_record_and_list_attendance() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/attendance",
        Some(&token),
        Some(json!({
            "student_id": student,
            "date": "2026-08-28",
            "status": "present",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Attendance recorded successfully");
    assert_eq!(body["data"]["student_id"], "STU001");
    assert_eq!(body["data"]["status"], "present");

    let (status, body) = common::send(
        &app,
        "GET",
        &format!("/api/v1/attendance?student_id={}", student),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_record_attendance_requires_date_and_status() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/attendance",
        Some(&token),
        Some(json!({ "student_id": student })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Date and status are required");
}

#[tokio::test]
async fn test_record_attendance_for_unknown_student() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/attendance",
        Some(&token),
        Some(json!({
            "student_id": "STU999",
            "date": "2026-08-28",
            "status": "absent",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");
}

#[tokio::test]
async fn test_since_filter_excludes_older_records() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;

    let today = Utc::now().date_naive();
    let old = today - Duration::days(60);

    for (date, status) in [(old, "absent"), (today, "present")] {
        let (status_code, _) = common::send(
            &app,
            "POST",
            "/api/v1/attendance",
            Some(&token),
            Some(json!({
                "student_id": student,
                "date": date.to_string(),
                "status": status,
            })),
        )
        .await;
        assert_eq!(status_code, StatusCode::CREATED);
    }

    let since = today - Duration::days(30);
    let (_, body) = common::send(
        &app,
        "GET",
        &format!("/api/v1/attendance?since={}", since),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["records"][0]["status"], "present");
}

#[tokio::test]
async fn test_attendance_is_staff_only() {
    let app = common::test_app().await;
    common::admin_token(&app).await;
    let student = common::register(&app, "pupil", "student").await;

    let (status, _) = common::send(&app, "GET", "/api/v1/attendance", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
