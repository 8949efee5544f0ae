//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use weezer_core::{UserId, Username};

/// A Weezer account (domain type).
///
/// The password hash is never part of this type; it is only read during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique, lower-cased handle.
    pub username: Username,
    /// Display name.
    pub name: String,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Public JSON shape of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username.into_inner(),
            name: user.name,
            created_at: user.created_at,
        }
    }
}
