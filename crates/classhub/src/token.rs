//! jwt access and refresh tokens.
//!
//! access tokens carry the user's identity and role and are short-lived.
//! refresh tokens carry only the user id, are signed with a different
//! secret, and are exchanged for a fresh pair at `/auth/refresh-token`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use classhub_types::{JwtConfig, Role, User, UserId};

/// claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// user id.
    pub sub: u64,
    /// username at issuance.
    pub username: String,
    /// email at issuance.
    pub email: String,
    /// role at issuance.
    pub role: Role,
    /// issued-at (unix seconds).
    pub iat: i64,
    /// expiry (unix seconds).
    pub exp: i64,
}

/// claims carried by a refresh token.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// user id.
    pub sub: u64,
    /// issued-at (unix seconds).
    pub iat: i64,
    /// expiry (unix seconds).
    pub exp: i64,
}

/// both tokens issued together at login/registration/refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    /// short-lived access token.
    pub access_token: String,
    /// long-lived refresh token.
    pub refresh_token: String,
}

/// issue an access + refresh token pair for a user.
pub fn issue_token_pair(
    config: &JwtConfig,
    user: &User,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    let now = Utc::now();

    let access = AccessClaims {
        sub: user.id.0,
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(config.access_ttl_minutes)).timestamp(),
    };
    let access_token = encode(
        &Header::default(),
        &access,
        &EncodingKey::from_secret(config.access_secret.as_bytes()),
    )?;

    let refresh = RefreshClaims {
        sub: user.id.0,
        iat: now.timestamp(),
        exp: (now + Duration::days(config.refresh_ttl_days)).timestamp(),
    };
    let refresh_token = encode(
        &Header::default(),
        &refresh,
        &EncodingKey::from_secret(config.refresh_secret.as_bytes()),
    )?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// verify an access token and return its claims.
///
/// expiry is checked here, not at issuance.
pub fn verify_access_token(
    config: &JwtConfig,
    token: &str,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.access_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// verify a refresh token and return the user id it was issued to.
pub fn verify_refresh_token(
    config: &JwtConfig,
    token: &str,
) -> Result<UserId, jsonwebtoken::errors::Error> {
    let data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.refresh_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(UserId(data.claims.sub))
}
