//! Post CRUD through the full stack.

use axum::http::StatusCode;
use integration_tests::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn create_then_fetch_a_post() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login("poster").await;
    let post_id = app.create_post(&token, "Sunrise at Bromo").await;

    let (status, body) = app
        .send("GET", &format!("/api/posts/{post_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Success"));
    assert_eq!(body["data"]["title"], json!("Sunrise at Bromo"));
    assert_eq!(body["data"]["userId"], json!(user_id));
    assert_eq!(body["data"]["isStarred"], json!(false));
    assert_eq!(body["data"]["averageRating"], Value::Null);
    assert_eq!(body["data"]["comments"], json!([]));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn missing_post_is_reported_as_400_with_fixed_message() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("seeker").await;

    let (status, body) = app.send("GET", "/api/posts/9999", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Post not found"));
    assert_eq!(body["errors"], Value::Null);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("lister").await;
    let first = app.create_post(&token, "First trip").await;
    let second = app.create_post(&token, "Second trip").await;

    let (status, body) = app.send("GET", "/api/posts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["postId"], json!(second));
    assert_eq!(data[1]["postId"], json!(first));
    assert_eq!(data[0]["commentCount"], json!(0));
    assert_eq!(data[0]["averageRating"], Value::Null);
}

#[tokio::test]
async fn empty_title_is_a_validation_error() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("strict").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/posts",
            Some(&token),
            Some(json!({"title": "   ", "description": "fine"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation error"));
    assert!(body["errors"]["title"].is_array());
}

#[tokio::test]
async fn owner_can_update_and_others_cannot() {
    let app = TestApp::spawn().await;
    let (_, owner_token) = app.register_and_login("owner").await;
    let (_, other_token) = app.register_and_login("other").await;
    let post_id = app.create_post(&owner_token, "Original title").await;

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/posts/{post_id}"),
            Some(&owner_token),
            Some(json!({"title": "Corrected title"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], json!("Corrected title"));
    // untouched field survives the partial update
    assert_eq!(
        body["data"]["description"],
        json!("Original title description")
    );

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/posts/{post_id}"),
            Some(&other_token),
            Some(json!({"title": "Hijacked"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn updating_a_missing_post_is_404() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("editor").await;

    let (status, body) = app
        .send(
            "PUT",
            "/api/posts/12345",
            Some(&token),
            Some(json!({"title": "Ghost"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn owner_can_delete_and_the_post_disappears() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("remover").await;
    let post_id = app.create_post(&token, "Short lived").await;

    let (status, body) = app
        .send("DELETE", &format!("/api/posts/{post_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Post deleted"));

    let (status, _) = app
        .send("GET", &format!("/api/posts/{post_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_the_owner_detaches_their_posts() {
    let app = TestApp::spawn().await;
    let (owner_id, owner_token) = app.register_and_login("leaving").await;
    let (_, viewer_token) = app.register_and_login("staying").await;
    let post_id = app.create_post(&owner_token, "Orphaned trip").await;

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/api/users/{owner_id}"),
            Some(&owner_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send("GET", &format!("/api/posts/{post_id}"), Some(&viewer_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userId"], Value::Null);
}
