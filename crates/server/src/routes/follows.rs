//! Follow graph of the acting user.

use axum::{Json, extract::State, http::StatusCode};

use super::Success;
use crate::db::{FollowRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::UserView;
use crate::state::AppState;
use crate::validation::ValidatedPath;
use crate::validation::requests::FolloweePath;

/// `GET /follows/following`
pub async fn following(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<Vec<UserView>>> {
    let users = FollowRepository::new(state.pool()).following(user_id).await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// `GET /follows/followers`
pub async fn followers(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<Vec<UserView>>> {
    let users = FollowRepository::new(state.pool()).followers(user_id).await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// `POST /follows/follow/{id}`
pub async fn follow(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    ValidatedPath(followee_id): ValidatedPath<FolloweePath>,
) -> Result<(StatusCode, Json<UserView>)> {
    if followee_id == user_id {
        return Err(AppError::Unprocessable("cannot follow yourself".to_string()));
    }

    let followee = UserRepository::new(state.pool())
        .get_by_id(followee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("followee not found".to_string()))?;

    FollowRepository::new(state.pool())
        .follow(user_id, followee_id)
        .await?;

    Ok((StatusCode::CREATED, Json(followee.into())))
}

/// `POST /follows/unfollow/{id}`
///
/// Removing an edge that does not exist still succeeds.
pub async fn unfollow(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    ValidatedPath(followee_id): ValidatedPath<FolloweePath>,
) -> Result<Json<Success>> {
    let removed = FollowRepository::new(state.pool())
        .unfollow(user_id, followee_id)
        .await?;

    tracing::debug!(%followee_id, removed, "Unfollow");
    Ok(Json(Success::OK))
}
