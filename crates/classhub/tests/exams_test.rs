//! integration tests for the exam endpoints.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_create_exam_applies_defaults() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/exams",
        Some(&token),
        Some(json!({
            "exam_name": "Midterm",
            "subject": "Mathematics",
            "class_name": "Grade 10A",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Exam created successfully");
    let exam = &body["data"];
    assert_eq!(exam["exam_code"], "EX001");
    assert_eq!(exam["total_marks"], 100);
    assert_eq!(exam["passing_marks"], 40);
    assert_eq!(exam["duration_minutes"], 60);
    assert_eq!(exam["status"], "scheduled");
}

#[tokio::test]
async fn test_create_exam_requires_name_subject_class() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/exams",
        Some(&token),
        Some(json!({ "exam_name": "Midterm" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Exam name, subject and class are required");
}

#[tokio::test]
async fn test_students_can_read_but_not_mutate_exams() {
    let app = common::test_app().await;
    let admin = common::admin_token(&app).await;
    common::create_exam(&app, &admin, "Midterm").await;
    let student = common::register(&app, "pupil", "student").await;

    let (status, _) = common::send(&app, "GET", "/api/v1/exams", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/exams",
        Some(&student),
        Some(json!({
            "exam_name": "Sneaky",
            "subject": "Art",
            "class_name": "Grade 1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_exam_merges_partial_fields() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let id = common::create_exam(&app, &token, "Midterm").await;

    let (status, body) = common::send(
        &app,
        "PUT",
        &format!("/api/v1/exams/{}", id),
        Some(&token),
        Some(json!({ "total_marks": 50, "status": "completed" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Exam updated successfully");
    let exam = &body["data"];
    assert_eq!(exam["total_marks"], 50);
    assert_eq!(exam["status"], "completed");
    // untouched fields survive
    assert_eq!(exam["exam_name"], "Midterm");
    assert_eq!(exam["subject"], "Mathematics");
}

#[tokio::test]
async fn test_deleted_exam_disappears_everywhere() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let id = common::create_exam(&app, &token, "Doomed").await;

    let (status, body) = common::send(
        &app,
        "DELETE",
        &format!("/api/v1/exams/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Exam deleted successfully");

    // gone from the listing
    let (_, body) = common::send(&app, "GET", "/api/v1/exams", Some(&token), None).await;
    assert_eq!(body["data"]["total"], 0);

    // gone from direct fetch, update and re-delete
    let uri = format!("/api/v1/exams/{}", id);
    let (status, _) = common::send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = common::send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "total_marks": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Exam not found");

    let (status, _) = common::send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
