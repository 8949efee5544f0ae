//! Authentication service.
//!
//! Username/password accounts with argon2 hashes. Successful signup or
//! login is answered with an access token from [`TokenKeys`].

mod error;
mod token;

pub use error::AuthError;
pub use token::{Claims, TokenKeys};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;
use crate::validation::requests::{Login, Signup};

/// Authentication service.
///
/// Handles account creation and password login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UsernameTaken` if the username is already registered.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    #[instrument(skip(self, signup), fields(username = %signup.username))]
    pub async fn register(&self, signup: Signup) -> Result<User, AuthError> {
        let password_hash = hash_password(&signup.password)?;

        let user = self
            .users
            .create(&signup.username, &signup.name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check a username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the user does not exist or
    /// the password is wrong.
    #[instrument(skip(self, login), fields(username = %login.username))]
    pub async fn login(&self, login: Login) -> Result<User, AuthError> {
        let (user, password_hash) = self
            .users
            .get_by_username_with_hash(&login.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(&login.password, &password_hash)?;

        Ok(user)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Hash a password using Argon2.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
