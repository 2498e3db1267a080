//! integration tests for the exam result endpoints.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_create_result_derives_percentage_and_grade() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;
    let exam_id = common::create_exam(&app, &token, "Midterm").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/results",
        Some(&token),
        Some(json!({
            "exam_id": exam_id,
            "student_id": student,
            "student_name": "Ada Obi",
            "marks_obtained": 42,
            "total_marks": 50,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Result uploaded successfully");
    let result = &body["data"];
    assert_eq!(result["result_code"], "RES001");
    assert_eq!(result["percentage"], 84.0);
    assert_eq!(result["grade"], "A");
    assert_eq!(result["status"], "draft");
    assert!(result["published_at"].is_null());
}

#[tokio::test]
async fn test_create_result_for_missing_exam_is_rejected() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/results",
        Some(&token),
        Some(json!({
            "exam_id": 999,
            "student_id": student,
            "marks_obtained": 10,
            "total_marks": 20,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Exam not found");
}

#[tokio::test]
async fn test_create_result_published_at_creation() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;
    let exam_id = common::create_exam(&app, &token, "Midterm").await;

    let id = common::create_published_result(&app, &token, exam_id, &student, 90.0).await;

    let (_, body) = common::send(
        &app,
        "GET",
        &format!("/api/v1/results?exam_id={}", exam_id),
        Some(&token),
        None,
    )
    .await;
    let results = body["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"].as_u64().unwrap(), id);
    assert_eq!(results[0]["status"], "published");
    assert!(results[0]["published_at"].is_string());
}

#[tokio::test]
async fn test_update_result_recomputes_derived_fields() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;
    let exam_id = common::create_exam(&app, &token, "Midterm").await;
    let id = common::create_published_result(&app, &token, exam_id, &student, 84.0).await;

    let (status, body) = common::send(
        &app,
        "PUT",
        &format!("/api/v1/results/{}", id),
        Some(&token),
        Some(json!({ "marks_obtained": 35 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Result updated successfully");
    assert_eq!(body["data"]["percentage"], 35.0);
    assert_eq!(body["data"]["grade"], "F");
}

#[tokio::test]
async fn test_publish_stamps_timestamp_once() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;
    let exam_id = common::create_exam(&app, &token, "Midterm").await;

    let (_, body) = common::send(
        &app,
        "POST",
        "/api/v1/results",
        Some(&token),
        Some(json!({
            "exam_id": exam_id,
            "student_id": student,
            "marks_obtained": 60,
            "total_marks": 100,
        })),
    )
    .await;
    let id = body["data"]["id"].as_u64().unwrap();

    let uri = format!("/api/v1/results/{}/publish", id);
    let (status, body) = common::send(&app, "POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Result published successfully");
    let first_stamp = body["data"]["published_at"].as_str().unwrap().to_string();

    // publishing again keeps the original timestamp
    let (status, body) = common::send(&app, "POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["published_at"], first_stamp.as_str());
}

#[tokio::test]
async fn test_results_listing_requires_staff() {
    let app = common::test_app().await;
    common::admin_token(&app).await;
    let student = common::register(&app, "pupil", "student").await;

    let (status, _) = common::send(&app, "GET", "/api/v1/results", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
