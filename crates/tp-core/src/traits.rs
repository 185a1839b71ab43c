//! # Core Traits (Ports)
//!
//! The store and auth adapters implement these traits; the API layer only
//! ever sees the trait objects.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Comment, NewPost, NewUser, Post, PostDetail, PostPatch, PostSummary, StarredPost, User,
};

/// Claims recovered from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClaims {
    pub user_id: i64,
    pub is_admin: bool,
}

/// Persistence contract for accounts.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Inserts a new account. Duplicate usernames yield `AppError::Conflict`.
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn get_user(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Stamps `last_login` with the current time.
    async fn touch_last_login(&self, id: i64) -> Result<()>;
    /// Returns `false` when no such user existed. Deleting a user cascades
    /// their stars and ratings and detaches (nulls) their posts.
    async fn delete_user(&self, id: i64) -> Result<bool>;
}

/// Persistence contract for posts and the engagement records hanging off
/// them. Engagement operations return `AppError::NotFound` when the target
/// post does not exist.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn create_post(&self, post: NewPost) -> Result<Post>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>>;
    /// Detail read model with the viewer-dependent `is_starred` field.
    async fn get_post_detail(&self, id: i64, viewer: i64) -> Result<Option<PostDetail>>;
    /// Newest first, with comment counts and average ratings.
    async fn list_posts(&self) -> Result<Vec<PostSummary>>;
    /// Applies a partial update and bumps `updated_at`.
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Post>;
    async fn delete_post(&self, id: i64) -> Result<bool>;

    /// Stars a post. A second star for the same (user, post) pair is
    /// `AppError::Conflict`.
    async fn star_post(&self, user_id: i64, post_id: i64) -> Result<StarredPost>;
    /// Returns `false` when the star did not exist.
    async fn unstar_post(&self, user_id: i64, post_id: i64) -> Result<bool>;
    /// Posts the user has starred, most recently starred first.
    async fn list_starred(&self, user_id: i64) -> Result<Vec<Post>>;

    /// Upserts the user's rating for a post. Range checking is the
    /// caller's job; the store accepts whatever integer it is handed.
    async fn rate_post(&self, user_id: i64, post_id: i64, rating: i32) -> Result<()>;
    /// Returns `false` when the user had no rating on the post.
    async fn delete_rating(&self, user_id: i64, post_id: i64) -> Result<bool>;

    async fn add_comment(&self, post_id: i64, user_id: i64, body: &str) -> Result<Comment>;
    /// Newest first.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>>;
}

/// Authentication capability: password hashing and token issuance.
/// Kept separate from the `User` record on purpose.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait AuthProvider: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;
    fn verify_password(&self, password: &str, hash: &str) -> bool;
    fn issue_token(&self, user: &User) -> Result<String>;
    /// `AppError::Unauthorized` for anything that is not a valid,
    /// unexpired token signed by us.
    fn verify_token(&self, token: &str) -> Result<AuthClaims>;
}
