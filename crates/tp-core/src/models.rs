//! # Domain Models
//!
//! These structs represent the core entities of trailpost: accounts,
//! travel posts, and the engagement records (stars, ratings, comments)
//! attached to them. Integer primary keys are assigned by the store and
//! stable for the lifetime of the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account. Authentication material lives in `password_hash`; the
/// capability to produce and check it belongs to the auth provider,
/// not to this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A travel post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub post_id: i64,
    pub title: String,
    pub description: String,
    /// Nullable by design: deleting the owner detaches the post
    /// instead of destroying it.
    pub user_id: Option<i64>,
    /// Opaque image payload (URL list or inline data), kept as text.
    pub images: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A star: one user favoriting one post. At most one per (user, post) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarredPost {
    pub star_id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment on a post. `username` is joined in by the store so views
/// don't need a second lookup; it is `None` when the author was deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub post_id: i64,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// List-view read model: a post plus the aggregates the index page shows.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post: Post,
    pub comment_count: i64,
    pub average_rating: Option<f64>,
}

/// Detail-view read model, computed relative to the requesting user.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    /// Whether the *viewer* has starred this post.
    pub is_starred: bool,
    /// Mean rating across all users, `None` when unrated.
    pub average_rating: Option<f64>,
    pub comments: Vec<Comment>,
}

/// Input for registering a user. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub user_id: Option<i64>,
    pub images: Option<String>,
}

/// Partial update for a post. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<String>,
}
