//! bearer-token authentication for the api
//!
//! this module provides jwt bearer authentication for protected endpoints.
//!
//! ## Authentication Flow
//!
//! 1. Extract `Authorization: Bearer <token>` header
//! 2. Verify the access token signature and expiry
//! 3. Load the user and check it is still active
//! 4. Hand the context to the handler for role checks

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};

use classhub_db::Database;
use classhub_types::{Role, User, UserId};

use crate::handlers::envelope::ErrorBody;
use crate::handlers::ApiError;
use crate::token;
use crate::AppState;

/// context for authenticated api requests
///
/// extracted from the `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// the authenticated user, freshly loaded.
    pub user: User,
}

impl AuthContext {
    /// get the user id
    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    /// require the caller to hold one of the given roles.
    pub fn authorize(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.user.role) {
            Ok(())
        } else {
            tracing::warn!(
                user = %self.user.username,
                role = %self.user.role,
                "role not permitted for this endpoint"
            );
            Err(ApiError::forbidden("Access denied"))
        }
    }
}

/// error type for authentication failures
#[derive(Debug)]
pub enum AuthError {
    /// missing Authorization header
    MissingHeader,
    /// invalid Authorization header format
    InvalidHeader,
    /// token failed verification or has expired
    InvalidToken,
    /// token verified but the user is gone or deactivated
    UnknownUser,
    /// database error
    Internal(String),
}

impl AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingHeader | Self::InvalidHeader | Self::InvalidToken | Self::UnknownUser => {
                StatusCode::UNAUTHORIZED
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::MissingHeader => "Missing authorization header",
            Self::InvalidHeader => "Invalid authorization header format",
            Self::InvalidToken => "Invalid or expired token",
            Self::UnknownUser => "Invalid or expired token",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        if let Self::Internal(msg) = &self {
            tracing::error!(error = %msg, "auth extractor failure");
        }
        let status = self.status_code();
        (status, Json(ErrorBody::new(self.message()))).into_response()
    }
}

/// parse a Bearer token from the Authorization header
fn parse_bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ").map(str::trim)
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidHeader)?;

        let token = parse_bearer_token(auth_header).ok_or(AuthError::InvalidHeader)?;

        let claims = token::verify_access_token(&state.config.jwt, token)
            .map_err(|_| AuthError::InvalidToken)?;

        // the claims name a user, but the user record decides access
        let user = state
            .db
            .get_user(UserId(claims.sub))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::UnknownUser)?;

        if !user.active {
            return Err(AuthError::UnknownUser);
        }

        Ok(AuthContext { user })
    }
}
