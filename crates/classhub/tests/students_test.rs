//! integration tests for the student endpoints.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_create_student_derives_code_from_id() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;

    let code = common::create_student(&app, &token, "Ada", "Obi").await;
    assert_eq!(code, "STU001");

    let code = common::create_student(&app, &token, "Bola", "Eze").await;
    assert_eq!(code, "STU002");
}

#[tokio::test]
async fn test_create_student_requires_admin() {
    let app = common::test_app().await;
    common::admin_token(&app).await;
    let teacher = common::register(&app, "teach", "teacher").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/students",
        Some(&teacher),
        Some(json!({
            "first_name": "Ada",
            "last_name": "Obi",
            "class_name": "Grade 10A",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied");
}

#[tokio::test]
async fn test_create_student_requires_name_and_class() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/students",
        Some(&token),
        Some(json!({ "first_name": "Ada" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_students_paginates() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;

    for i in 0..25 {
        common::create_student(&app, &token, &format!("First{}", i), "Last").await;
    }

    let (status, body) = common::send(
        &app,
        "GET",
        "/api/v1/students?page=2&limit=10",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["students"].as_array().unwrap().len(), 10);
    let pagination = &body["data"]["pagination"];
    assert_eq!(pagination["total"], 25);
    assert_eq!(pagination["page"], 2);
    assert_eq!(pagination["limit"], 10);
    assert_eq!(pagination["totalPages"], 3);
}

#[tokio::test]
async fn test_list_students_search_matches_code() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;

    common::create_student(&app, &token, "Ada", "Obi").await;
    common::create_student(&app, &token, "Bola", "Eze").await;

    let (status, body) = common::send(
        &app,
        "GET",
        "/api/v1/students?search=STU002",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let students = body["data"]["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["student_code"], "STU002");
}

#[tokio::test]
async fn test_get_student_by_id() {
    let app = common::test_app().await;
    let token = common::admin_token(&app).await;
    common::create_student(&app, &token, "Ada", "Obi").await;

    let (status, body) =
        common::send(&app, "GET", "/api/v1/students/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["first_name"], "Ada");

    let (status, body) =
        common::send(&app, "GET", "/api/v1/students/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");
}
