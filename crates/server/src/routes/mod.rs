//! HTTP route handlers for the Weezer API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness
//! GET    /health/ready           - Readiness (database reachable)
//!
//! # Auth (rate limited per IP)
//! POST   /auth/signup            - Create account, returns {token, user}
//! POST   /auth/login             - Password login, returns {token, user}
//!
//! # Everything below requires `Authorization: Bearer <token>`
//! GET    /profile                - Own posts
//! POST   /profile                - Create post
//! GET    /profile/{id}           - One post
//! PATCH  /profile/{id}           - Update own post
//! DELETE /profile/{id}           - Delete own post
//! GET    /feed                   - Posts by followees, newest first
//! GET    /follows/following      - Users I follow
//! GET    /follows/followers      - Users following me
//! POST   /follows/follow/{id}    - Follow a user
//! POST   /follows/unfollow/{id}  - Unfollow a user
//! POST   /comments/{id}          - Comment on post `id`
//! DELETE /comments/{id}          - Delete own comment
//! ```

pub mod auth;
pub mod comments;
pub mod feed;
pub mod follows;
pub mod health;
pub mod profile;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{auth_rate_limiter, request_id_middleware};
use crate::state::AppState;

/// `{"success": true}` body for deletes and unfollows.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Success {
    success: bool,
}

impl Success {
    pub const OK: Self = Self { success: true };
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

/// Create the profile (own posts) routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::index).post(profile::create))
        .route(
            "/{id}",
            get(profile::show)
                .patch(profile::update)
                .delete(profile::delete),
        )
}

/// Create the follow routes router.
pub fn follow_routes() -> Router<AppState> {
    Router::new()
        .route("/following", get(follows::following))
        .route("/followers", get(follows::followers))
        .route("/follow/{id}", post(follows::follow))
        .route("/unfollow/{id}", post(follows::unfollow))
}

/// Create the comment routes router.
pub fn comment_routes() -> Router<AppState> {
    Router::new().route("/{id}", post(comments::create).delete(comments::delete))
}

/// Create all API routes.
pub fn routes(rate_limit_auth: bool) -> Router<AppState> {
    let auth = if rate_limit_auth {
        auth_routes().layer(auth_rate_limiter())
    } else {
        auth_routes()
    };

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/auth", auth)
        .nest("/profile", profile_routes())
        .route("/feed", get(feed::index))
        .nest("/follows", follow_routes())
        .nest("/comments", comment_routes())
}

/// Build the full application: routes, request IDs and request tracing.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    routes(state.config().rate_limit_auth)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
