//! Follow graph edits.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use weezer_integration_tests::{TestContext, TestUser};
use weezer_server::db::FollowRepository;

async fn following_ids(ctx: &TestContext, user: &TestUser) -> Vec<Value> {
    let (status, body) = ctx.get("/follows/following", user).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].clone())
        .collect()
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_follow_then_unfollow_restores_graph() {
    let ctx = TestContext::new().await;
    let alice = ctx.signup().await;
    let bob = ctx.signup().await;
    let follows = FollowRepository::new(&ctx.pool);

    let before = following_ids(&ctx, &alice).await;
    assert!(before.is_empty());

    let (status, followee) = ctx
        .post(&format!("/follows/follow/{}", bob.id), &alice, None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(followee["id"], bob.id.to_string());
    assert!(follows.is_following(alice.id, bob.id).await.unwrap());
    assert!(!follows.is_following(bob.id, alice.id).await.unwrap());

    let (status, followers) = ctx.get("/follows/followers", &bob).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(followers[0]["id"], alice.id.to_string());

    let (status, body) = ctx
        .post(&format!("/follows/unfollow/{}", bob.id), &alice, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert!(!follows.is_following(alice.id, bob.id).await.unwrap());
    assert_eq!(following_ids(&ctx, &alice).await, before);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_duplicate_follow_conflicts() {
    let ctx = TestContext::new().await;
    let alice = ctx.signup().await;
    let bob = ctx.signup().await;
    let path = format!("/follows/follow/{}", bob.id);

    let (status, _) = ctx.post(&path, &alice, None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx.post(&path, &alice, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].is_string());
    assert_eq!(following_ids(&ctx, &alice).await.len(), 1);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_follow_unknown_user_is_not_found() {
    let ctx = TestContext::new().await;
    let alice = ctx.signup().await;

    let (status, body) = ctx
        .post(&format!("/follows/follow/{}", Uuid::new_v4()), &alice, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "followee not found");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_unfollow_without_edge_succeeds() {
    let ctx = TestContext::new().await;
    let alice = ctx.signup().await;
    let bob = ctx.signup().await;

    let (status, body) = ctx
        .post(&format!("/follows/unfollow/{}", bob.id), &alice, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}
