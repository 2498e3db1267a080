//! shared helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use classhub::create_app;
use classhub_db::ClasshubDb;
use classhub_types::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

/// build an app backed by a fresh in-memory database.
pub async fn test_app() -> Router {
    let db = ClasshubDb::new_in_memory()
        .await
        .expect("failed to create in-memory database");
    create_app(db, Config::default())
}

/// build an app and also hand back its database handle.
pub async fn test_app_with_db() -> (Router, ClasshubDb) {
    let db = ClasshubDb::new_in_memory()
        .await
        .expect("failed to create in-memory database");
    let app = create_app(db.clone(), Config::default());
    (app, db)
}

/// send one request and return (status, parsed json body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be json")
    };

    (status, body)
}

/// register an account and return its access token.
pub async fn register(app: &Router, username: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@school.test", username),
            "password": "s3cret-pw",
            "role": role,
            "firstName": "Test",
            "lastName": "User",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    body["data"]["accessToken"]
        .as_str()
        .expect("register response should carry an access token")
        .to_string()
}

/// register an admin and return its access token.
pub async fn admin_token(app: &Router) -> String {
    register(app, "admin", "admin").await
}

/// create a student via the api, returning its code (e.g. "STU001").
pub async fn create_student(app: &Router, token: &str, first: &str, last: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/students",
        Some(token),
        Some(json!({
            "first_name": first,
            "last_name": last,
            "class_name": "Grade 10A",
            "email": format!("{}.{}@school.test", first, last).to_lowercase(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create student failed: {}", body);

    body["data"]["student_code"]
        .as_str()
        .expect("student response should carry a code")
        .to_string()
}

/// create an exam via the api, returning its id.
pub async fn create_exam(app: &Router, token: &str, name: &str) -> u64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/exams",
        Some(token),
        Some(json!({
            "exam_name": name,
            "subject": "Mathematics",
            "class_name": "Grade 10A",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create exam failed: {}", body);

    body["data"]["id"].as_u64().expect("exam response should carry an id")
}

/// upload a published result for a student, returning its id.
pub async fn create_published_result(
    app: &Router,
    token: &str,
    exam_id: u64,
    student_code: &str,
    marks: f64,
) -> u64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/results",
        Some(token),
        Some(json!({
            "exam_id": exam_id,
            "student_id": student_code,
            "student_name": "Test Student",
            "marks_obtained": marks,
            "total_marks": 100,
            "status": "published",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create result failed: {}", body);

    body["data"]["id"].as_u64().expect("result response should carry an id")
}

/// generate a pin for a student, returning the code string.
pub async fn generate_pin(app: &Router, token: &str, student_code: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/pins/generate",
        Some(token),
        Some(json!({ "student_id": student_code })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "generate pin failed: {}", body);

    body["data"]["pin_code"]
        .as_str()
        .expect("pin response should carry a code")
        .to_string()
}
