//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unknown username.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username is already registered.
    #[error("username already exists")]
    UsernameTaken,

    /// Bearer token missing, malformed, expired or badly signed.
    #[error("invalid token")]
    InvalidToken,

    /// Token could not be signed.
    #[error("token signing error: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    /// Token expiry falls outside the representable time range.
    #[error("token lifetime out of range")]
    TokenLifetime,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
