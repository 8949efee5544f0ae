//! Business logic between the HTTP handlers and the repositories.

pub mod auth;
pub mod comments;
pub mod feed;
pub mod posts;
