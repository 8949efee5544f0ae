//! The acting user's own posts.

use axum::{Json, extract::State, http::StatusCode};

use super::Success;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::PostView;
use crate::services::posts::PostService;
use crate::state::AppState;
use crate::validation::requests::{NewPostBody, PostIdPath, UpdatePostBody};
use crate::validation::{ValidatedJson, ValidatedPath};

fn post_not_found() -> AppError {
    AppError::NotFound("post not found".to_string())
}

/// `GET /profile`
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<Vec<PostView>>> {
    let posts = PostService::new(state.pool()).list_by_author(user_id).await?;
    Ok(Json(posts))
}

/// `GET /profile/{id}`
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user_id): RequireAuth,
    ValidatedPath(id): ValidatedPath<PostIdPath>,
) -> Result<Json<PostView>> {
    PostService::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(post_not_found)
}

/// `POST /profile`
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    ValidatedJson(new_post): ValidatedJson<NewPostBody>,
) -> Result<(StatusCode, Json<PostView>)> {
    let post = PostService::new(state.pool())
        .create(user_id, new_post)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `PATCH /profile/{id}`
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    ValidatedPath(id): ValidatedPath<PostIdPath>,
    ValidatedJson(patch): ValidatedJson<UpdatePostBody>,
) -> Result<Json<PostView>> {
    PostService::new(state.pool())
        .update(id, user_id, &patch)
        .await?
        .map(Json)
        .ok_or_else(post_not_found)
}

/// `DELETE /profile/{id}`
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    ValidatedPath(id): ValidatedPath<PostIdPath>,
) -> Result<Json<Success>> {
    if PostService::new(state.pool()).delete(id, user_id).await? {
        Ok(Json(Success::OK))
    } else {
        Err(post_not_found())
    }
}
