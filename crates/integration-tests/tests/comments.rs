//! Commenting on posts.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

use weezer_core::PostId;
use weezer_integration_tests::TestContext;
use weezer_server::db::CommentRepository;

const POST_BODY: &str = "A post body that is long enough to keep.";
const COMMENT_BODY: &str = "A comment body that is long enough too.";

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_comment_and_delete() {
    let ctx = TestContext::new().await;
    let author = ctx.signup().await;
    let reader = ctx.signup().await;
    let post = ctx.create_post(&author, POST_BODY).await;
    let post_id = post["id"].as_str().unwrap();

    let (status, comment) = ctx
        .post(
            &format!("/comments/{post_id}"),
            &reader,
            Some(json!({ "body": COMMENT_BODY })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["body"], COMMENT_BODY);
    assert_eq!(comment["post_id"], post_id);
    assert_eq!(comment["user"]["id"], reader.id.to_string());

    let (_, shown) = ctx.get(&format!("/profile/{post_id}"), &author).await;
    assert_eq!(shown["comments"][0]["id"], comment["id"]);

    let comment_path = format!("/comments/{}", comment["id"].as_str().unwrap());
    let (status, _) = ctx.delete(&comment_path, &author).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx.delete(&comment_path, &reader).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let count = CommentRepository::new(&ctx.pool)
        .count_for_post(PostId::parse(post_id).unwrap())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_short_comment_creates_nothing() {
    let ctx = TestContext::new().await;
    let user = ctx.signup().await;
    let post = ctx.create_post(&user, POST_BODY).await;
    let post_id = post["id"].as_str().unwrap();

    let (status, body) = ctx
        .post(
            &format!("/comments/{post_id}"),
            &user,
            Some(json!({ "body": "too short" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().contains("\"body\""));

    let count = CommentRepository::new(&ctx.pool)
        .count_for_post(PostId::parse(post_id).unwrap())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_comment_on_unknown_post_is_not_found() {
    let ctx = TestContext::new().await;
    let user = ctx.signup().await;

    let (status, body) = ctx
        .post(
            &format!("/comments/{}", Uuid::new_v4()),
            &user,
            Some(json!({ "body": COMMENT_BODY })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "post not found");
}
