//! integration tests for registration, login and token refresh.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_register_returns_user_and_tokens() {
    let app = common::test_app().await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "jadesola",
            "email": "jadesola@school.test",
            "password": "pw-12345",
            "role": "teacher",
            "firstName": "Jadesola",
            "lastName": "Ade",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["user"]["username"], "jadesola");
    assert_eq!(body["data"]["user"]["role"], "teacher");
    assert!(body["data"]["accessToken"].is_string());
    assert!(body["data"]["refreshToken"].is_string());
    // the password hash must never appear anywhere in the response
    assert!(!body.to_string().contains("pw-12345"));
}

#[tokio::test]
async fn test_register_missing_fields_is_rejected() {
    let app = common::test_app().await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "lonely" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn test_register_duplicate_is_a_conflict() {
    let app = common::test_app().await;
    common::register(&app, "dupe", "student").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "dupe",
            "email": "other@school.test",
            "password": "pw-12345",
            "role": "student",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username or email already exists");
}

#[tokio::test]
async fn test_login_succeeds_with_correct_credentials() {
    let app = common::test_app().await;
    common::register(&app, "kemi", "teacher").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({
            "username": "kemi",
            "password": "s3cret-pw",
            "role": "teacher",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert!(body["data"]["accessToken"].is_string());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = common::test_app().await;
    common::register(&app, "kemi", "teacher").await;

    // wrong password
    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "kemi", "password": "wrong", "role": "teacher" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    // unknown username: identical status and message
    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "nobody", "password": "wrong", "role": "teacher" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    // right credentials but wrong role
    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "kemi", "password": "s3cret-pw", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = common::test_app().await;

    let (_, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "rotator",
            "email": "rotator@school.test",
            "password": "pw-12345",
            "role": "student",
        })),
    )
    .await;
    let refresh_token = body["data"]["refreshToken"].as_str().unwrap().to_string();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/refresh-token",
        None,
        Some(json!({ "refreshToken": refresh_token })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["accessToken"].is_string());
    assert!(body["data"]["refreshToken"].is_string());
}

#[tokio::test]
async fn test_access_token_is_not_a_refresh_token() {
    let app = common::test_app().await;
    let access = common::register(&app, "sneaky", "student").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/refresh-token",
        None,
        Some(json!({ "refreshToken": access })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired refresh token");
}

#[tokio::test]
async fn test_protected_route_rejects_missing_and_garbage_tokens() {
    let app = common::test_app().await;

    let (status, _) = common::send(&app, "GET", "/api/v1/students", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        common::send(&app, "GET", "/api/v1/students", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
