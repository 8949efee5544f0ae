//! Feed composition across real follow edges.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use weezer_integration_tests::TestContext;

fn ids(feed: &Value) -> Vec<&str> {
    feed.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_feed_holds_followee_posts_newest_first() {
    let ctx = TestContext::new().await;
    let reader = ctx.signup().await;
    let bob = ctx.signup().await;
    let carol = ctx.signup().await;
    let stranger = ctx.signup().await;

    for followee in [&bob, &carol] {
        let (status, _) = ctx
            .post(&format!("/follows/follow/{}", followee.id), &reader, None)
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let p1 = ctx.create_post(&bob, "Bob writes the very first post.").await;
    let p2 = ctx.create_post(&carol, "Carol answers with a second post.").await;
    ctx.create_post(&stranger, "Nobody follows this stranger at all.").await;
    ctx.create_post(&reader, "The reader's own post stays out of it.").await;
    let p3 = ctx.create_post(&bob, "Bob closes with the newest post.").await;

    let (status, feed) = ctx.get("/feed", &reader).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&feed),
        vec![
            p3["id"].as_str().unwrap(),
            p2["id"].as_str().unwrap(),
            p1["id"].as_str().unwrap(),
        ]
    );
    assert_eq!(feed[0]["user"]["id"], bob.id.to_string());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_feed_includes_comments() {
    let ctx = TestContext::new().await;
    let reader = ctx.signup().await;
    let bob = ctx.signup().await;

    ctx.post(&format!("/follows/follow/{}", bob.id), &reader, None)
        .await;
    let post = ctx.create_post(&bob, "A post that will collect a comment.").await;
    let (status, _) = ctx
        .post(
            &format!("/comments/{}", post["id"].as_str().unwrap()),
            &reader,
            Some(serde_json::json!({ "body": "A reply of more than twenty chars." })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, feed) = ctx.get("/feed", &reader).await;
    let comments = feed[0]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["user"]["id"], reader.id.to_string());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_feed_empty_without_follows() {
    let ctx = TestContext::new().await;
    let reader = ctx.signup().await;

    let (status, feed) = ctx.get("/feed", &reader).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&feed).is_empty());
}
