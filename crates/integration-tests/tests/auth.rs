//! Signup and login against a real database.

#![allow(clippy::unwrap_used)]

use reqwest::{Method, StatusCode};
use serde_json::json;

use weezer_integration_tests::TestContext;
use weezer_server::db::UserRepository;

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_signup_then_login() {
    let ctx = TestContext::new().await;
    let user = ctx.signup().await;

    assert!(UserRepository::new(&ctx.pool).exists(user.id).await.unwrap());

    let (status, body) = ctx
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": user.username, "password": "integration-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_login_is_case_insensitive() {
    let ctx = TestContext::new().await;
    let user = ctx.signup().await;

    let (status, _) = ctx
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({
                "username": user.username.to_uppercase(),
                "password": "integration-password",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_duplicate_username_conflicts() {
    let ctx = TestContext::new().await;
    let user = ctx.signup().await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({
                "username": user.username,
                "name": "Someone Else",
                "password": "another-password",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_wrong_password_is_unauthorized() {
    let ctx = TestContext::new().await;
    let user = ctx.signup().await;

    let (status, wrong_password) = ctx
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": user.username, "password": "not-the-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_user) = ctx
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "nobody_here", "password": "not-the-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
}
