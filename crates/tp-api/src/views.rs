//! Wire-facing view types (the "serializer" layer).
//!
//! Domain models stay snake_case; everything that crosses the wire is
//! camelCase, matching the clients this API serves. `PostDetailView`
//! carries the two computed fields (`isStarred`, `averageRating`).

use chrono::{DateTime, Utc};
use serde::Serialize;

use tp_core::models::{Comment, Post, PostDetail, PostSummary, User};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub post_id: i64,
    pub title: String,
    pub description: String,
    pub user_id: Option<i64>,
    pub images: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.post_id,
            title: post.title.clone(),
            description: post.description.clone(),
            user_id: post.user_id,
            images: post.images.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// List entry: the post plus the aggregates the index shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryView {
    #[serde(flatten)]
    pub post: PostView,
    pub comment_count: i64,
    pub average_rating: Option<f64>,
}

impl From<&PostSummary> for PostSummaryView {
    fn from(summary: &PostSummary) -> Self {
        Self {
            post: PostView::from(&summary.post),
            comment_count: summary.comment_count,
            average_rating: summary.average_rating,
        }
    }
}

/// Detail view, viewer-relative.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailView {
    #[serde(flatten)]
    pub post: PostView,
    pub is_starred: bool,
    pub average_rating: Option<f64>,
    pub comments: Vec<CommentView>,
}

impl From<&PostDetail> for PostDetailView {
    fn from(detail: &PostDetail) -> Self {
        Self {
            post: PostView::from(&detail.post),
            is_starred: detail.is_starred,
            average_rating: detail.average_rating,
            comments: detail.comments.iter().map(CommentView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub comment_id: i64,
    pub post_id: i64,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            comment_id: comment.comment_id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            username: comment.username.clone(),
            body: comment.body.clone(),
            created_at: comment.created_at,
        }
    }
}

/// Login response: the token plus the account it belongs to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    pub token: String,
    pub user: UserView,
}
