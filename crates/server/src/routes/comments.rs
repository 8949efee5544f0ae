//! Comments on posts.

use axum::{Json, extract::State, http::StatusCode};

use super::Success;
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::CommentView;
use crate::services::comments::CommentService;
use crate::state::AppState;
use crate::validation::requests::{CommentIdPath, CommentTargetPath, NewCommentBody};
use crate::validation::{ValidatedJson, ValidatedPath};

/// `POST /comments/{id}` where `id` is the post being commented on.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    ValidatedPath(post_id): ValidatedPath<CommentTargetPath>,
    ValidatedJson(new_comment): ValidatedJson<NewCommentBody>,
) -> Result<(StatusCode, Json<CommentView>)> {
    let comment = CommentService::new(state.pool())
        .create(user_id, post_id, new_comment)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("post not found".to_string()),
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// `DELETE /comments/{id}`
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    ValidatedPath(id): ValidatedPath<CommentIdPath>,
) -> Result<Json<Success>> {
    if CommentService::new(state.pool()).delete(id, user_id).await? {
        Ok(Json(Success::OK))
    } else {
        Err(AppError::NotFound("comment not found".to_string()))
    }
}
