//! Weezer Core - Shared types library.
//!
//! This crate provides common types used across all Weezer components:
//! - `server` - The JSON API (posts, comments, follows, feed)
//! - `cli` - Command-line tools for migrations, users and demo data
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
