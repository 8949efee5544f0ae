//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input string is empty.
    #[error("is not allowed to be empty")]
    Empty,
    /// The input string is too short.
    #[error("length must be at least {min} characters long")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input string is too long.
    #[error("length must be less than or equal to {max} characters long")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9_]`.
    #[error("must only contain letters, digits and underscores")]
    InvalidCharacter,
}

/// A unique handle identifying a user at login.
///
/// ## Constraints
///
/// - Length: 3-30 characters
/// - Only ASCII letters, digits and `_`
/// - Stored lower-case; parsing trims and lower-cases the input
///
/// ## Examples
///
/// ```
/// use weezer_core::Username;
///
/// assert_eq!(Username::parse("  Alice_1 ").unwrap().as_str(), "alice_1");
/// assert!(Username::parse("ab").is_err());          // too short
/// assert!(Username::parse("white space").is_err()); // invalid character
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Minimum length of a username.
    pub const MIN_LENGTH: usize = 3;
    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 30;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, outside the length
    /// bounds, or contains characters other than ASCII letters, digits and `_`.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        let len = trimmed.chars().count();
        if len < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if len > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Username {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Username {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Username {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_usernames() {
        assert!(Username::parse("bob").is_ok());
        assert!(Username::parse("alice_smith").is_ok());
        assert!(Username::parse("user42").is_ok());
        assert!(Username::parse(&"a".repeat(30)).is_ok());
    }

    #[test]
    fn test_parse_normalizes() {
        let username = Username::parse("  MalColm ").unwrap();
        assert_eq!(username.as_str(), "malcolm");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
        assert_eq!(Username::parse("   "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_parse_length_bounds() {
        assert_eq!(
            Username::parse("ab"),
            Err(UsernameError::TooShort { min: 3 })
        );
        assert_eq!(
            Username::parse(&"a".repeat(31)),
            Err(UsernameError::TooLong { max: 30 })
        );
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert_eq!(
            Username::parse("bob smith"),
            Err(UsernameError::InvalidCharacter)
        );
        assert_eq!(
            Username::parse("bob@home"),
            Err(UsernameError::InvalidCharacter)
        );
        assert_eq!(
            Username::parse("zoë_user"),
            Err(UsernameError::InvalidCharacter)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UsernameError::TooShort { min: 3 }.to_string(),
            "length must be at least 3 characters long"
        );
    }

    #[test]
    fn test_serde_transparent() {
        let username = Username::parse("carol").unwrap();
        assert_eq!(serde_json::to_string(&username).unwrap(), "\"carol\"");
    }
}
