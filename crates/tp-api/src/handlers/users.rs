//! Account endpoints: registration, login, lookup, deletion.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use tp_core::error::{AppError, ValidationErrors};
use tp_core::models::NewUser;

use crate::extract::AuthUser;
use crate::response::{ApiResponse, ApiResult};
use crate::views::{LoginView, UserView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /api/users` (public)
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult {
    let username = req.username.trim().to_string();

    let mut errors = ValidationErrors::new();
    if username.chars().count() < 3 {
        errors.add("username", "must be at least 3 characters");
    }
    if username.chars().count() > 32 {
        errors.add("username", "must be at most 32 characters");
    }
    if req.password.chars().count() < 8 {
        errors.add("password", "must be at least 8 characters");
    }
    errors.into_result()?;

    let password_hash = state.auth.hash_password(&req.password)?;
    let user = state
        .users
        .create_user(NewUser {
            username,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.user_id, "registered user");
    Ok(ApiResponse::success_with(
        UserView::from(&user),
        "Success",
        StatusCode::CREATED,
    ))
}

/// `POST /api/auth/login` (public)
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult {
    let user = state
        .users
        .get_user_by_username(req.username.trim())
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("unknown username '{}'", req.username)))?;

    if !state.auth.verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized("wrong password".to_string()).into());
    }

    state.users.touch_last_login(user.user_id).await?;
    let token = state.auth.issue_token(&user)?;

    Ok(ApiResponse::success(LoginView {
        token,
        user: UserView::from(&user),
    }))
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    AuthUser(_viewer): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult {
    let user = state
        .users
        .get_user(id)
        .await?
        .ok_or(AppError::NotFound("user", id))?;
    Ok(ApiResponse::success(UserView::from(&user)))
}

/// `DELETE /api/users/{id}` — self-service or admin.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult {
    if caller.user_id != id && !caller.is_admin {
        return Err(AppError::Forbidden("cannot delete another user's account".to_string()).into());
    }

    if !state.users.delete_user(id).await? {
        return Err(AppError::NotFound("user", id).into());
    }

    tracing::info!(user_id = id, deleted_by = caller.user_id, "deleted user");
    Ok(ApiResponse::success_with(
        Value::Null,
        "User deleted",
        StatusCode::OK,
    ))
}
