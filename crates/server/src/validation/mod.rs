//! Request validation.
//!
//! Every request body and path parameter is checked by a [`Validate`]
//! implementation before a handler touches the database. Validators consume
//! the raw deserialized value and return a normalized one (trimmed strings,
//! lower-cased usernames, parsed ids) or the first rule it breaks.
//!
//! Messages follow the `"<field>" <constraint>` shape clients already know,
//! e.g. `"body" length must be at least 20 characters long`.

mod extract;
pub mod requests;

use std::str::FromStr;

use thiserror::Error;
use weezer_core::InvalidId;

pub use extract::{ValidatedJson, ValidatedPath};

/// Minimum length of post and comment bodies.
pub const MIN_BODY_LENGTH: usize = 20;
/// Maximum length of a post body.
pub const MAX_POST_BODY_LENGTH: usize = 5000;
/// Maximum length of a comment body.
pub const MAX_COMMENT_BODY_LENGTH: usize = 2000;
/// Maximum length of a post title.
pub const MAX_TITLE_LENGTH: usize = 120;
/// Maximum length of a display name.
pub const MAX_NAME_LENGTH: usize = 80;
/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum password length (bounds argon2 work per request).
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// The first constraint a request violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{field}\" {message}")]
pub struct ValidationError {
    /// Name of the offending field as the client sent it.
    pub field: &'static str,
    /// Constraint description.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Schema check for a deserialized request value.
pub trait Validate {
    /// Normalized value handed to the handler.
    type Output;

    /// Check every rule, returning the normalized value or the first violation.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` describing the first rule that failed.
    fn validate(self) -> Result<Self::Output, ValidationError>;
}

// =============================================================================
// Rules
// =============================================================================

/// Require a string field to be present and non-blank. Returns it trimmed.
///
/// # Errors
///
/// Returns `ValidationError` if the value is missing or blank.
pub fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::new(field, "is required"))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "is not allowed to be empty"));
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional string field, treating a blank value as absent.
#[must_use]
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Require at least `min` characters.
///
/// # Errors
///
/// Returns `ValidationError` if `value` is shorter than `min` characters.
pub fn min_length(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::new(
            field,
            format!("length must be at least {min} characters long"),
        ));
    }
    Ok(())
}

/// Allow at most `max` characters.
///
/// # Errors
///
/// Returns `ValidationError` if `value` is longer than `max` characters.
pub fn max_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("length must be less than or equal to {max} characters long"),
        ));
    }
    Ok(())
}

/// Require `min <= value <= max`.
///
/// # Errors
///
/// Returns `ValidationError` naming whichever bound was crossed.
pub fn range(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, ValidationError> {
    if value < min {
        return Err(ValidationError::new(
            field,
            format!("must be greater than or equal to {min}"),
        ));
    }
    if value > max {
        return Err(ValidationError::new(
            field,
            format!("must be less than or equal to {max}"),
        ));
    }
    Ok(value)
}

/// Parse a typed UUID id.
///
/// # Errors
///
/// Returns `ValidationError` if `value` is not a UUID.
pub fn uuid<T>(field: &'static str, value: &str) -> Result<T, ValidationError>
where
    T: FromStr<Err = InvalidId>,
{
    value
        .parse()
        .map_err(|e: InvalidId| ValidationError::new(field, e.to_string()))
}
