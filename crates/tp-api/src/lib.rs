//! # tp-api
//!
//! The web routing and orchestration layer for trailpost.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod views;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use tp_core::traits::{AuthProvider, PostRepo, UserRepo};

/// State shared across all handlers: the ports, as trait objects, so the
/// binary decides which adapters back them.
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub posts: Arc<dyn PostRepo>,
    pub auth: Arc<dyn AuthProvider>,
}

/// Builds the API router. Registration and login are public; everything
/// else goes through the `AuthUser` guard.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/users", post(handlers::users::register))
        .route("/api/auth/login", post(handlers::users::login))
        .route(
            "/api/users/{id}",
            get(handlers::users::get_user).delete(handlers::users::delete_user),
        )
        .route(
            "/api/users/{id}/starred",
            get(handlers::engagement::list_starred),
        )
        .route(
            "/api/posts",
            post(handlers::posts::create_post).get(handlers::posts::list_posts),
        )
        .route(
            "/api/posts/{id}",
            get(handlers::posts::get_post_by_id)
                .put(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        .route(
            "/api/posts/{id}/star",
            post(handlers::engagement::star_post).delete(handlers::engagement::unstar_post),
        )
        .route(
            "/api/posts/{id}/rating",
            put(handlers::engagement::rate_post).delete(handlers::engagement::delete_rating),
        )
        .route(
            "/api/posts/{id}/comments",
            post(handlers::engagement::add_comment).get(handlers::engagement::list_comments),
        )
        .layer(middleware::trace_layer())
        .layer(middleware::cors_policy())
        .with_state(state)
}
