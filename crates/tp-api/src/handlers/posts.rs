//! Post CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use tp_core::error::{AppError, ValidationErrors};
use tp_core::models::{NewPost, Post, PostPatch, User};

use crate::extract::AuthUser;
use crate::response::{ApiResponse, ApiResult};
use crate::views::{PostDetailView, PostSummaryView, PostView};
use crate::AppState;

const MAX_TITLE_LEN: usize = 255;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub description: String,
    pub images: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<String>,
}

fn check_title(errors: &mut ValidationErrors, title: &str) {
    if title.trim().is_empty() {
        errors.add("title", "must not be empty");
    }
    if title.chars().count() > MAX_TITLE_LEN {
        errors.add("title", "must be at most 255 characters");
    }
}

fn check_description(errors: &mut ValidationErrors, description: &str) {
    if description.trim().is_empty() {
        errors.add("description", "must not be empty");
    }
}

/// Owner or admin; everyone else is turned away.
fn check_can_edit(caller: &User, post: &Post) -> Result<(), AppError> {
    if post.user_id == Some(caller.user_id) || caller.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("not the owner of this post".to_string()))
    }
}

/// `POST /api/posts`
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> ApiResult {
    let mut errors = ValidationErrors::new();
    check_title(&mut errors, &req.title);
    check_description(&mut errors, &req.description);
    errors.into_result()?;

    let post = state
        .posts
        .create_post(NewPost {
            title: req.title.trim().to_string(),
            description: req.description,
            user_id: Some(caller.user_id),
            images: req.images,
        })
        .await?;

    tracing::info!(post_id = post.post_id, user_id = caller.user_id, "created post");
    Ok(ApiResponse::success_with(
        PostView::from(&post),
        "Success",
        StatusCode::CREATED,
    ))
}

/// `GET /api/posts` — newest first, with comment counts and average ratings.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    AuthUser(_viewer): AuthUser,
) -> ApiResult {
    let posts = state.posts.list_posts().await?;
    let views: Vec<PostSummaryView> = posts.iter().map(PostSummaryView::from).collect();
    Ok(ApiResponse::success(views))
}

/// `GET /api/posts/{id}`
pub async fn get_post_by_id(
    State(state): State<Arc<AppState>>,
    AuthUser(viewer): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult {
    // Explicit existence check answering 400. Because it runs first, the
    // generic not-found -> 404 mapping is unreachable for this route;
    // clients depend on the 400 here.
    let Some(detail) = state.posts.get_post_detail(id, viewer.user_id).await? else {
        return Ok(ApiResponse::error(
            "Post not found",
            StatusCode::BAD_REQUEST,
            None,
        ));
    };

    Ok(ApiResponse::success(PostDetailView::from(&detail)))
}

/// `PUT /api/posts/{id}` — partial update by the owner or an admin.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> ApiResult {
    let post = state
        .posts
        .get_post(id)
        .await?
        .ok_or(AppError::NotFound("post", id))?;
    check_can_edit(&caller, &post)?;

    let mut errors = ValidationErrors::new();
    if let Some(title) = &req.title {
        check_title(&mut errors, title);
    }
    if let Some(description) = &req.description {
        check_description(&mut errors, description);
    }
    errors.into_result()?;

    let updated = state
        .posts
        .update_post(
            id,
            PostPatch {
                title: req.title.map(|t| t.trim().to_string()),
                description: req.description,
                images: req.images,
            },
        )
        .await?;

    Ok(ApiResponse::success(PostView::from(&updated)))
}

/// `DELETE /api/posts/{id}` — owner or admin.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult {
    let post = state
        .posts
        .get_post(id)
        .await?
        .ok_or(AppError::NotFound("post", id))?;
    check_can_edit(&caller, &post)?;

    state.posts.delete_post(id).await?;
    tracing::info!(post_id = id, user_id = caller.user_id, "deleted post");
    Ok(ApiResponse::success_with(
        Value::Null,
        "Post deleted",
        StatusCode::OK,
    ))
}
