//! Weezer API server library.
//!
//! A small social backend: users sign up, write posts, comment, follow each
//! other and read a feed of the posts of everyone they follow.
//!
//! Requests flow router -> auth extractor -> path/body validation ->
//! handler -> service -> repository -> JSON response.
//!
//! The binary in `main.rs` wires configuration, logging and Sentry around
//! [`routes::app`]; the CLI and integration tests reuse the same pieces.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

pub use config::{ConfigError, ServerConfig};
pub use error::AppError;
pub use routes::app;
pub use state::AppState;

/// Embedded schema migrations, applied by `weezer-cli migrate`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
