//! Signup and login.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::error::Result;
use crate::models::{User, UserView};
use crate::services::auth::AuthService;
use crate::state::AppState;
use crate::validation::ValidatedJson;
use crate::validation::requests::{LoginBody, SignupBody};

/// Response to a successful signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

fn respond(state: &AppState, user: User) -> Result<AuthResponse> {
    let token = state.tokens().issue(user.id)?;
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

/// `POST /auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(signup): ValidatedJson<SignupBody>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let user = AuthService::new(state.pool()).register(signup).await?;
    Ok((StatusCode::CREATED, Json(respond(&state, user)?)))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(login): ValidatedJson<LoginBody>,
) -> Result<Json<AuthResponse>> {
    let user = AuthService::new(state.pool()).login(login).await?;
    Ok(Json(respond(&state, user)?))
}
