//! Shared harness for the end-to-end API tests: a real router over an
//! in-memory SQLite store and a real token provider.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;

use tp_api::AppState;
use tp_auth::TokenAuthProvider;
use tp_db_sqlite::SqliteStore;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<SqliteStore>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = Arc::new(SqliteStore::connect_in_memory().await.unwrap());
        let auth = TokenAuthProvider::new("test-secret", Duration::minutes(60), "trailpost-test");
        let state = Arc::new(AppState {
            users: store.clone(),
            posts: store.clone(),
            auth: Arc::new(auth),
        });
        Self {
            router: tp_api::router(state),
            store,
        }
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// Registers an account and logs it in, returning `(user_id, token)`.
    pub async fn register_and_login(&self, username: &str) -> (i64, String) {
        let password = "a-long-enough-password";
        let (status, body) = self
            .send(
                "POST",
                "/api/users",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let user_id = body["data"]["userId"].as_i64().unwrap();

        let (status, body) = self
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        let token = body["data"]["token"].as_str().unwrap().to_string();

        (user_id, token)
    }

    /// Creates a post as the given token's user and returns its id.
    pub async fn create_post(&self, token: &str, title: &str) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/api/posts",
                Some(token),
                Some(json!({"title": title, "description": format!("{title} description")})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create post failed: {body}");
        body["data"]["postId"].as_i64().unwrap()
    }
}
