//! authentication endpoints for api v1.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use classhub_db::{AuditLog, Database};
use classhub_types::{Role, User, UserId};

use crate::handlers::{ApiError, ApiResponse, JsonBody};
use crate::token::{self, TokenPair};
use crate::AppState;

/// bcrypt work factor for password hashing.
const BCRYPT_COST: u32 = 10;

/// user representation in auth responses. the password hash never
/// leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            username: user.username,
            email: user.email,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// request body for registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// response payload carrying a user and a token pair.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthPayload {
    fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            user: user.into(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

/// request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
}

/// request body for token refresh.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

/// response payload for token refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    pub access_token: String,
    pub refresh_token: String,
}

/// create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
}

/// register a new account.
///
/// `POST /api/v1/auth/register`
async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), ApiError> {
    let role = match req.role {
        Some(role) => role,
        None => return Err(ApiError::bad_request("All fields are required")),
    };
    if req.username.is_empty()
        || req.email.is_empty()
        || req.password.is_empty()
        || req.first_name.is_empty()
        || req.last_name.is_empty()
    {
        return Err(ApiError::bad_request("All fields are required"));
    }

    if state
        .db
        .get_user_by_username_or_email(&req.username, &req.email)
        .await
        .map_err(ApiError::internal)?
        .is_some()
    {
        return Err(ApiError::conflict("Username or email already exists"));
    }

    let password_hash =
        bcrypt::hash(&req.password, BCRYPT_COST).map_err(ApiError::internal)?;

    let mut user = User::new(UserId(0), req.username, req.email, role);
    user.password_hash = password_hash;
    user.first_name = req.first_name;
    user.last_name = req.last_name;

    let user = state.db.create_user(&user).await.map_err(ApiError::internal)?;
    info!(username = %user.username, role = %user.role, "user registered");

    let _ = state
        .db
        .record_audit(&AuditLog::by_user(&user, "registered an account"))
        .await;

    let tokens = token::issue_token_pair(&state.config.jwt, &user).map_err(ApiError::internal)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "User registered successfully",
            AuthPayload::new(user, tokens),
        )),
    ))
}

/// log in with username, password and role.
///
/// `POST /api/v1/auth/login`
///
/// unknown user, wrong role and wrong password all answer the same 401,
/// so the endpoint cannot be used to enumerate accounts.
async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<AuthPayload>>, ApiError> {
    let role = match req.role {
        Some(role) => role,
        None => {
            return Err(ApiError::bad_request(
                "Username, password, and role are required",
            ))
        }
    };
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request(
            "Username, password, and role are required",
        ));
    }

    let user = state
        .db
        .get_user_by_username(&req.username)
        .await
        .map_err(ApiError::internal)?
        .filter(|u| u.active && u.role == role);

    let user = match user {
        Some(user) => user,
        None => {
            warn!(username = %req.username, "login rejected");
            return Err(ApiError::unauthorized("Invalid credentials"));
        }
    };

    let valid =
        bcrypt::verify(&req.password, &user.password_hash).map_err(ApiError::internal)?;
    if !valid {
        warn!(username = %req.username, "login rejected");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    state
        .db
        .touch_last_login(user.id)
        .await
        .map_err(ApiError::internal)?;

    let tokens = token::issue_token_pair(&state.config.jwt, &user).map_err(ApiError::internal)?;
    info!(username = %user.username, "login successful");

    Ok(Json(ApiResponse::with_message(
        "Login successful",
        AuthPayload::new(user, tokens),
    )))
}

/// exchange a refresh token for a fresh token pair.
///
/// `POST /api/v1/auth/refresh-token`
async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshPayload>>, ApiError> {
    if req.refresh_token.is_empty() {
        return Err(ApiError::bad_request("Refresh token is required"));
    }

    let user_id = token::verify_refresh_token(&state.config.jwt, &req.refresh_token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired refresh token"))?;

    let user = state
        .db
        .get_user(user_id)
        .await
        .map_err(ApiError::internal)?
        .filter(|u| u.active)
        .ok_or_else(|| ApiError::unauthorized("Invalid refresh token"))?;

    let tokens = token::issue_token_pair(&state.config.jwt, &user).map_err(ApiError::internal)?;

    Ok(Json(ApiResponse::data(RefreshPayload {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    })))
}
