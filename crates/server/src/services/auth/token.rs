//! HS256 access tokens.
//!
//! Tokens carry `{sub, iat, exp}` where `sub` is the user's UUID. They are
//! stateless; there is no server-side revocation.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use weezer_core::UserId;

use super::AuthError;

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: String,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expires at (unix seconds).
    pub exp: i64,
}

/// Signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenKeys {
    /// Build keys from the configured secret.
    ///
    /// A lifetime beyond chrono's range saturates; `issue` then reports
    /// `AuthError::TokenLifetime` instead of minting a token.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_hours: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl: Duration::try_hours(ttl_hours).unwrap_or(Duration::MAX),
        }
    }

    /// Issue a token for `user` valid from now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if encoding fails.
    pub fn issue(&self, user: UserId) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token for `user` as if it were created at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenLifetime` if the expiry overflows, or
    /// `AuthError::TokenSigning` if encoding fails.
    pub fn issue_at(&self, user: UserId, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::TokenLifetime)?;
        let claims = Claims {
            sub: user.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verify a token and return the user it was issued to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is malformed, expired,
    /// signed with another key, or names an invalid user ID.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        UserId::parse(&data.claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}
