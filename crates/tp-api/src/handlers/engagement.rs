//! Engagement endpoints: stars, ratings, comments.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use tp_core::error::{AppError, ValidationErrors};

use crate::extract::AuthUser;
use crate::response::{ApiResponse, ApiResult};
use crate::views::{CommentView, PostView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: i32,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

/// `POST /api/posts/{id}/star`
pub async fn star_post(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult {
    state.posts.star_post(caller.user_id, id).await?;
    Ok(ApiResponse::success_with(
        Value::Null,
        "Post starred",
        StatusCode::CREATED,
    ))
}

/// `DELETE /api/posts/{id}/star`
pub async fn unstar_post(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult {
    if !state.posts.unstar_post(caller.user_id, id).await? {
        return Err(AppError::NotFound("star", id).into());
    }
    Ok(ApiResponse::success_with(
        Value::Null,
        "Post unstarred",
        StatusCode::OK,
    ))
}

/// `GET /api/users/{id}/starred` — a user's starred posts, own or admin.
pub async fn list_starred(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult {
    if caller.user_id != id && !caller.is_admin {
        return Err(
            AppError::Forbidden("cannot view another user's starred posts".to_string()).into(),
        );
    }

    let posts = state.posts.list_starred(id).await?;
    let views: Vec<PostView> = posts.iter().map(PostView::from).collect();
    Ok(ApiResponse::success(views))
}

/// `PUT /api/posts/{id}/rating` — upsert the caller's rating.
pub async fn rate_post(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<RateRequest>,
) -> ApiResult {
    let mut errors = ValidationErrors::new();
    if !(1..=5).contains(&req.rating) {
        errors.add("rating", "must be between 1 and 5");
    }
    errors.into_result()?;

    state.posts.rate_post(caller.user_id, id, req.rating).await?;
    Ok(ApiResponse::success_with(
        Value::Null,
        "Rating saved",
        StatusCode::OK,
    ))
}

/// `DELETE /api/posts/{id}/rating`
pub async fn delete_rating(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult {
    if !state.posts.delete_rating(caller.user_id, id).await? {
        return Err(AppError::NotFound("rating", id).into());
    }
    Ok(ApiResponse::success_with(
        Value::Null,
        "Rating deleted",
        StatusCode::OK,
    ))
}

/// `POST /api/posts/{id}/comments`
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CommentRequest>,
) -> ApiResult {
    let body = req.body.trim();
    let mut errors = ValidationErrors::new();
    if body.is_empty() {
        errors.add("body", "must not be empty");
    }
    if body.chars().count() > 2000 {
        errors.add("body", "must be at most 2000 characters");
    }
    errors.into_result()?;

    let comment = state.posts.add_comment(id, caller.user_id, body).await?;
    Ok(ApiResponse::success_with(
        CommentView::from(&comment),
        "Success",
        StatusCode::CREATED,
    ))
}

/// `GET /api/posts/{id}/comments` — newest first.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    AuthUser(_viewer): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult {
    let comments = state.posts.list_comments(id).await?;
    let views: Vec<CommentView> = comments.iter().map(CommentView::from).collect();
    Ok(ApiResponse::success(views))
}
