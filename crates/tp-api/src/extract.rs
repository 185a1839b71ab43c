//! Request authentication.
//!
//! `AuthUser` is the guard every protected handler takes as an argument.
//! Its rejection is an `ApiError`, so a failed extraction produces the
//! normalized 401 envelope rather than a framework default.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use tp_core::error::AppError;
use tp_core::models::User;

use crate::response::ApiError;
use crate::AppState;

/// The authenticated caller, freshly loaded from the store so revoked
/// accounts fail even with a token that still verifies.
pub struct AuthUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::from(AppError::Unauthorized(
                    "missing authorization header".to_string(),
                ))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::from(AppError::Unauthorized(
                "authorization header is not a bearer token".to_string(),
            ))
        })?;

        let claims = state.auth.verify_token(token)?;

        let user = state
            .users
            .get_user(claims.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("token subject no longer exists".to_string()))?;

        Ok(AuthUser(user))
    }
}
