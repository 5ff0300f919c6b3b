use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::cookie::time::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::claims::SessionClaims;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Why a session cookie was rejected. Every variant means "anonymous".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenError {
    #[error("token_expired")]
    Expired,
    #[error("invalid_signature")]
    InvalidSignature,
    #[error("invalid_token")]
    Malformed,
}

/// Seconds since epoch for `now`.
pub fn unix_seconds(now: SystemTime) -> Result<i64, AppError> {
    now.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| AppError::internal("Failed to get current time"))
}

/// Mint a signed session token valid for `lifetime`.
pub fn mint_session_token(
    user_id: &str,
    email: &str,
    now: SystemTime,
    lifetime: Duration,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = unix_seconds(now)?;
    let claims = SessionClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat,
        exp: iat + lifetime.whole_seconds(),
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.session_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
}

/// Verify a session token and return its claims.
pub fn verify_session_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<SessionClaims, SessionTokenError> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let validation = Validation::new(security.algorithm);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(&security.session_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => SessionTokenError::Expired,
        ErrorKind::InvalidSignature => SessionTokenError::InvalidSignature,
        _ => SessionTokenError::Malformed,
    })
}
