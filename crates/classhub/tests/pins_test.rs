//! integration tests for pin generation and the public result checker.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_generate_pin_returns_full_code() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/pins/generate",
        Some(&token),
        Some(json!({ "student_id": student })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "PIN generated successfully");
    let pin = &body["data"];
    assert!(pin["pin_code"].as_str().unwrap().starts_with("PIN-"));
    assert_eq!(pin["student_id"], "STU001");
    assert_eq!(pin["max_usage_count"], 5);
    assert_eq!(pin["current_usage_count"], 0);
    assert_eq!(pin["remaining_checks"], 5);
    assert_eq!(pin["active"], true);
}

#[tokio::test]
async fn test_generate_pin_for_unknown_student_is_rejected() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/pins/generate",
        Some(&token),
        Some(json!({ "student_id": "STU999" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");
}

#[tokio::test]
async fn test_bulk_generate_skips_unknown_students() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    common::create_student(&app, &token, "Ada", "Obi").await;
    common::create_student(&app, &token, "Bola", "Eze").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/pins/bulk-generate",
        Some(&token),
        Some(json!({ "student_ids": ["STU001", "STU999", "STU002"] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["pins"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_check_requires_student_id_and_pin() {
    let app = common::test_app().await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/results/check",
        None,
        Some(json!({ "student_id": "STU001" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student ID and PIN are required");
}

#[tokio::test]
async fn test_check_with_unknown_pin_is_unauthorized() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    common::create_student(&app, &token, "Ada", "Obi").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/results/check",
        None,
        Some(json!({ "student_id": "STU001", "pin_code": "PIN-2026-9999" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid PIN or Student ID");
}

#[tokio::test]
async fn test_check_with_someone_elses_pin_is_unauthorized() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let ada = common::create_student(&app, &token, "Ada", "Obi").await;
    let bola = common::create_student(&app, &token, "Bola", "Eze").await;
    let pin = common::generate_pin(&app, &token, &ada).await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/results/check",
        None,
        Some(json!({ "student_id": bola, "pin_code": pin })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid PIN or Student ID");
}

#[tokio::test]
async fn test_check_with_expired_pin() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;

    let (_, body) = common::send(
        &app,
        "POST",
        "/api/v1/pins/generate",
        Some(&token),
        Some(json!({ "student_id": student, "valid_days": -1 })),
    )
    .await;
    let pin = body["data"]["pin_code"].as_str().unwrap().to_string();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/results/check",
        None,
        Some(json!({ "student_id": student, "pin_code": pin })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "PIN has expired");
}

#[tokio::test]
async fn test_check_without_published_results() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;
    let exam_id = common::create_exam(&app, &token, "Midterm").await;
    let pin = common::generate_pin(&app, &token, &student).await;

    // a draft result exists but must stay invisible to the checker
    let (_, _) = common::send(
        &app,
        "POST",
        "/api/v1/results",
        Some(&token),
        Some(json!({
            "exam_id": exam_id,
            "student_id": student,
            "marks_obtained": 50,
            "total_marks": 100,
        })),
    )
    .await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/results/check",
        None,
        Some(json!({ "student_id": student, "pin_code": pin })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No published results found for this student");
}

#[tokio::test]
async fn test_successful_check_returns_results_and_consumes_a_use() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;
    let exam_id = common::create_exam(&app, &token, "Midterm").await;
    common::create_published_result(&app, &token, exam_id, &student, 84.0).await;
    let pin = common::generate_pin(&app, &token, &student).await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/results/check",
        None,
        Some(json!({ "student_id": student, "pin_code": pin })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Results retrieved successfully");
    let data = &body["data"];
    assert_eq!(data["student"]["student_code"], "STU001");
    let results = data["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["grade"], "A");
    assert_eq!(results[0]["exam_details"]["exam_name"], "Midterm");
    assert_eq!(data["pin_info"]["remaining_checks"], 4);
}

#[tokio::test]
async fn test_failed_checks_do_not_consume_uses() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;
    let pin = common::generate_pin(&app, &token, &student).await;

    // no published results yet, so this check fails
    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/results/check",
        None,
        Some(json!({ "student_id": student, "pin_code": pin })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = common::send(
        &app,
        "GET",
        &format!("/api/v1/pins?student_id={}", student),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["pins"][0]["current_usage_count"], 0);
}

#[tokio::test]
async fn test_pin_exhaustion_blocks_further_checks() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    let student = common::create_student(&app, &token, "Ada", "Obi").await;
    let exam_id = common::create_exam(&app, &token, "Midterm").await;
    common::create_published_result(&app, &token, exam_id, &student, 70.0).await;

    let (_, body) = common::send(
        &app,
        "POST",
        "/api/v1/pins/generate",
        Some(&token),
        Some(json!({ "student_id": student, "max_usage_count": 2 })),
    )
    .await;
    let pin = body["data"]["pin_code"].as_str().unwrap().to_string();

    let check = json!({ "student_id": student, "pin_code": pin });

    let (status, body) =
        common::send(&app, "POST", "/api/v1/results/check", None, Some(check.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pin_info"]["remaining_checks"], 1);

    let (status, body) =
        common::send(&app, "POST", "/api/v1/results/check", None, Some(check.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pin_info"]["remaining_checks"], 0);

    // every allowed use is gone now
    let (status, body) =
        common::send(&app, "POST", "/api/v1/results/check", None, Some(check)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "PIN usage limit exceeded");
}

#[tokio::test]
async fn test_pin_listing_requires_staff() {
    let app = common::test_app().await;
    common::admin_token(&app).await;
    let student = common::register(&app, "pupil", "student").await;

    let (status, _) = common::send(&app, "GET", "/api/v1/pins", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
