//! Stars, ratings, and comments through the full stack.

use axum::http::StatusCode;
use integration_tests::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn star_unstar_and_the_starred_list() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login("stargazer").await;
    let a = app.create_post(&token, "Trip A").await;
    let b = app.create_post(&token, "Trip B").await;

    for post in [a, b] {
        let (status, body) = app
            .send("POST", &format!("/api/posts/{post}/star"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], json!("Post starred"));
    }

    let (status, body) = app
        .send(
            "GET",
            &format!("/api/users/{user_id}/starred"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    // most recently starred first
    assert_eq!(data[0]["postId"], json!(b));

    let (status, _) = app
        .send("DELETE", &format!("/api/posts/{a}/star"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send("DELETE", &format!("/api/posts/{a}/star"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn one_star_per_user_and_post() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("repeat").await;
    let post = app.create_post(&token, "Starred twice").await;

    let (status, _) = app
        .send("POST", &format!("/api/posts/{post}/star"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send("POST", &format!("/api/posts/{post}/star"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn starring_a_missing_post_is_404() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("lost").await;

    let (status, _) = app
        .send("POST", "/api/posts/31337/star", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn another_users_starred_list_is_off_limits() {
    let app = TestApp::spawn().await;
    let (other_id, _) = app.register_and_login("private").await;
    let (_, token) = app.register_and_login("nosy").await;

    let (status, _) = app
        .send(
            "GET",
            &format!("/api/users/{other_id}/starred"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ratings_average_and_upsert() {
    let app = TestApp::spawn().await;
    let (_, alice) = app.register_and_login("alice").await;
    let (_, bob) = app.register_and_login("bob").await;
    let post = app.create_post(&alice, "Rated trip").await;

    for (token, rating) in [(&alice, 2), (&bob, 4)] {
        let (status, _) = app
            .send(
                "PUT",
                &format!("/api/posts/{post}/rating"),
                Some(token),
                Some(json!({"rating": rating})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app
        .send("GET", &format!("/api/posts/{post}"), Some(&alice), None)
        .await;
    assert_eq!(body["data"]["averageRating"], json!(3.0));

    // re-rating replaces, not accumulates
    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/posts/{post}/rating"),
            Some(&alice),
            Some(json!({"rating": 4})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app
        .send("GET", &format!("/api/posts/{post}"), Some(&alice), None)
        .await;
    assert_eq!(body["data"]["averageRating"], json!(4.0));

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/api/posts/{post}/rating"),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send(
            "DELETE",
            &format!("/api/posts/{post}/rating"),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comments_show_up_newest_first_with_their_author() {
    let app = TestApp::spawn().await;
    let (_, author) = app.register_and_login("author").await;
    let (_, friend) = app.register_and_login("friend").await;
    let post = app.create_post(&author, "Commented trip").await;

    for (token, text) in [(&author, "first!"), (&friend, "looks amazing")] {
        let (status, body) = app
            .send(
                "POST",
                &format!("/api/posts/{post}/comments"),
                Some(token),
                Some(json!({"body": text})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "comment failed: {body}");
    }

    let (status, body) = app
        .send(
            "GET",
            &format!("/api/posts/{post}/comments"),
            Some(&author),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["body"], json!("looks amazing"));
    assert_eq!(data[0]["username"], json!("friend"));

    // detail view embeds the same comments and counts them in the list view
    let (_, body) = app
        .send("GET", &format!("/api/posts/{post}"), Some(&author), None)
        .await;
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 2);

    let (_, body) = app.send("GET", "/api/posts", Some(&author), None).await;
    assert_eq!(body["data"][0]["commentCount"], json!(2));
}

#[tokio::test]
async fn empty_comment_is_a_validation_error() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("quiet").await;
    let post = app.create_post(&token, "Silent trip").await;

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/posts/{post}/comments"),
            Some(&token),
            Some(json!({"body": "   "})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation error"));
    assert!(body["errors"]["body"].is_array());
}

#[tokio::test]
async fn deleting_a_user_cascades_their_engagement() {
    let app = TestApp::spawn().await;
    let (_, owner) = app.register_and_login("host").await;
    let (fan_id, fan) = app.register_and_login("fan").await;
    let post = app.create_post(&owner, "Popular trip").await;

    let (status, _) = app
        .send("POST", &format!("/api/posts/{post}/star"), Some(&fan), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/posts/{post}/rating"),
            Some(&fan),
            Some(json!({"rating": 5})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send("DELETE", &format!("/api/users/{fan_id}"), Some(&fan), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .send("GET", &format!("/api/posts/{post}"), Some(&owner), None)
        .await;
    assert_eq!(body["data"]["averageRating"], Value::Null);

    use tp_core::traits::PostRepo;
    assert!(app.store.list_starred(fan_id).await.unwrap().is_empty());
}
