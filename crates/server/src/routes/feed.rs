//! The acting user's feed.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::PostView;
use crate::services::feed::FeedService;
use crate::state::AppState;

/// `GET /feed`
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<Vec<PostView>>> {
    let feed = FeedService::new(state.pool()).for_user(user_id).await?;
    Ok(Json(feed))
}
