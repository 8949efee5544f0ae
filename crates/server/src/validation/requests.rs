//! Request bodies and path parameters with their validation rules.
//!
//! Body fields are deserialized as `Option` so a missing field reports
//! `"<field>" is required` instead of a serde error.

use serde::Deserialize;

use weezer_core::{CommentId, PostId, UserId, Username};

use super::{
    MAX_COMMENT_BODY_LENGTH, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_POST_BODY_LENGTH,
    MAX_TITLE_LENGTH, MIN_BODY_LENGTH, MIN_PASSWORD_LENGTH, Validate, ValidationError, max_length,
    min_length, optional, required, uuid,
};
use crate::models::PostPatch;

// =============================================================================
// Auth
// =============================================================================

/// `POST /auth/signup` body.
#[derive(Debug, Deserialize)]
pub struct SignupBody {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Validated signup request.
#[derive(Debug)]
pub struct Signup {
    pub username: Username,
    pub name: String,
    pub password: String,
}

impl Validate for SignupBody {
    type Output = Signup;

    fn validate(self) -> Result<Signup, ValidationError> {
        let username = parse_username(self.username)?;

        let name = required("name", self.name)?;
        max_length("name", &name, MAX_NAME_LENGTH)?;

        let password = password(self.password)?;

        Ok(Signup {
            username,
            name,
            password,
        })
    }
}

/// `POST /auth/login` body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Validated login request.
#[derive(Debug)]
pub struct Login {
    pub username: Username,
    pub password: String,
}

impl Validate for LoginBody {
    type Output = Login;

    fn validate(self) -> Result<Login, ValidationError> {
        let username = parse_username(self.username)?;
        // Login only checks presence; strength rules apply at signup.
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ValidationError::new("password", "is required"))?;

        Ok(Login { username, password })
    }
}

fn parse_username(raw: Option<String>) -> Result<Username, ValidationError> {
    let raw = required("username", raw)?;
    Username::parse(&raw).map_err(|e| ValidationError::new("username", e.to_string()))
}

/// Passwords are not trimmed; whitespace is significant.
fn password(raw: Option<String>) -> Result<String, ValidationError> {
    let password = raw.ok_or_else(|| ValidationError::new("password", "is required"))?;
    if password.is_empty() {
        return Err(ValidationError::new("password", "is not allowed to be empty"));
    }
    min_length("password", &password, MIN_PASSWORD_LENGTH)?;
    max_length("password", &password, MAX_PASSWORD_LENGTH)?;
    Ok(password)
}

// =============================================================================
// Posts
// =============================================================================

/// `POST /profile` body.
#[derive(Debug, Deserialize)]
pub struct NewPostBody {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Validated new post.
#[derive(Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: Option<String>,
    pub body: String,
}

impl Validate for NewPostBody {
    type Output = NewPost;

    fn validate(self) -> Result<NewPost, ValidationError> {
        let title = post_title(self.title)?;

        let body = required("body", self.body)?;
        min_length("body", &body, MIN_BODY_LENGTH)?;
        max_length("body", &body, MAX_POST_BODY_LENGTH)?;

        Ok(NewPost { title, body })
    }
}

/// `PATCH /profile/{id}` body. At least one field must be present.
///
/// A blank title counts as absent, so a patch keeps the stored title
/// rather than clearing it.
#[derive(Debug, Deserialize)]
pub struct UpdatePostBody {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl Validate for UpdatePostBody {
    type Output = PostPatch;

    fn validate(self) -> Result<PostPatch, ValidationError> {
        let patch = PostPatch {
            title: post_title(self.title)?,
            body: post_body(self.body)?,
        };

        if patch.is_empty() {
            return Err(ValidationError::new(
                "value",
                "must contain at least one of [title, body]",
            ));
        }
        Ok(patch)
    }
}

fn post_title(raw: Option<String>) -> Result<Option<String>, ValidationError> {
    let title = optional(raw);
    if let Some(title) = &title {
        max_length("title", title, MAX_TITLE_LENGTH)?;
    }
    Ok(title)
}

fn post_body(raw: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(body) = raw else {
        return Ok(None);
    };
    let body = body.trim().to_owned();
    min_length("body", &body, MIN_BODY_LENGTH)?;
    max_length("body", &body, MAX_POST_BODY_LENGTH)?;
    Ok(Some(body))
}

// =============================================================================
// Comments
// =============================================================================

/// `POST /comments/{id}` body.
#[derive(Debug, Deserialize)]
pub struct NewCommentBody {
    pub body: Option<String>,
}

/// Validated new comment.
#[derive(Debug, PartialEq, Eq)]
pub struct NewComment {
    pub body: String,
}

impl Validate for NewCommentBody {
    type Output = NewComment;

    fn validate(self) -> Result<NewComment, ValidationError> {
        let body = required("body", self.body)?;
        min_length("body", &body, MIN_BODY_LENGTH)?;
        max_length("body", &body, MAX_COMMENT_BODY_LENGTH)?;
        Ok(NewComment { body })
    }
}

// =============================================================================
// Path parameters
// =============================================================================

/// `{id}` naming a post.
#[derive(Debug, Deserialize)]
pub struct PostIdPath(String);

impl Validate for PostIdPath {
    type Output = PostId;

    fn validate(self) -> Result<PostId, ValidationError> {
        uuid("id", &self.0)
    }
}

/// `{id}` naming the post a new comment is attached to.
#[derive(Debug, Deserialize)]
pub struct CommentTargetPath(String);

impl Validate for CommentTargetPath {
    type Output = PostId;

    fn validate(self) -> Result<PostId, ValidationError> {
        uuid("post_id", &self.0)
    }
}

/// `{id}` naming a comment.
#[derive(Debug, Deserialize)]
pub struct CommentIdPath(String);

impl Validate for CommentIdPath {
    type Output = CommentId;

    fn validate(self) -> Result<CommentId, ValidationError> {
        uuid("id", &self.0)
    }
}

/// `{id}` naming the user to follow or unfollow.
#[derive(Debug, Deserialize)]
pub struct FolloweePath(String);

impl Validate for FolloweePath {
    type Output = UserId;

    fn validate(self) -> Result<UserId, ValidationError> {
        uuid("followee_id", &self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn long_body() -> String {
        "this body is long enough to pass".to_string()
    }

    #[test]
    fn test_signup_normalizes() {
        let signup = SignupBody {
            username: Some("  Alice ".into()),
            name: Some(" Alice Liddell ".into()),
            password: Some("correct horse".into()),
        }
        .validate()
        .unwrap();

        assert_eq!(signup.username.as_str(), "alice");
        assert_eq!(signup.name, "Alice Liddell");
        assert_eq!(signup.password, "correct horse");
    }

    #[test]
    fn test_signup_rejects_in_field_order() {
        let err = SignupBody {
            username: None,
            name: None,
            password: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "\"username\" is required");

        let err = SignupBody {
            username: Some("alice".into()),
            name: Some("Alice".into()),
            password: Some("short".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"password\" length must be at least 8 characters long"
        );
    }

    #[test]
    fn test_signup_rejects_bad_username() {
        let err = SignupBody {
            username: Some("no spaces".into()),
            name: Some("N".into()),
            password: Some("password1".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "username");
    }

    #[test]
    fn test_login_requires_password() {
        let err = LoginBody {
            username: Some("alice".into()),
            password: Some(String::new()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "\"password\" is required");
    }

    #[test]
    fn test_new_post_body_too_short() {
        let err = NewPostBody {
            title: None,
            body: Some("short".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"body\" length must be at least 20 characters long"
        );
    }

    #[test]
    fn test_new_post_body_is_trimmed_before_length_check() {
        let padded = format!("   {}   ", "x".repeat(19));
        assert!(
            NewPostBody {
                title: None,
                body: Some(padded),
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_new_post_blank_title_is_dropped() {
        let post = NewPostBody {
            title: Some("   ".into()),
            body: Some(long_body()),
        }
        .validate()
        .unwrap();
        assert_eq!(post.title, None);
        assert_eq!(post.body, long_body());
    }

    #[test]
    fn test_update_requires_a_field() {
        let err = UpdatePostBody {
            title: None,
            body: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"value\" must contain at least one of [title, body]"
        );
    }

    #[test]
    fn test_update_blank_title_is_not_a_change() {
        let err = UpdatePostBody {
            title: Some("  ".into()),
            body: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "value");

        let patch = UpdatePostBody {
            title: Some(String::new()),
            body: Some(long_body()),
        }
        .validate()
        .unwrap();
        assert_eq!(patch.title, None);
    }

    #[test]
    fn test_update_checks_body_length() {
        let err = UpdatePostBody {
            title: Some("New title".into()),
            body: Some("tiny".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "body");

        let patch = UpdatePostBody {
            title: Some("New title".into()),
            body: None,
        }
        .validate()
        .unwrap();
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert_eq!(patch.body, None);
    }

    #[test]
    fn test_new_comment() {
        let err = NewCommentBody {
            body: Some("too short".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "body");

        let comment = NewCommentBody {
            body: Some(long_body()),
        }
        .validate()
        .unwrap();
        assert_eq!(comment.body, long_body());
    }

    #[test]
    fn test_path_ids() {
        let raw = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(
            PostIdPath(raw.into()).validate().unwrap().to_string(),
            raw
        );
        assert_eq!(
            CommentTargetPath("nope".into())
                .validate()
                .unwrap_err()
                .to_string(),
            "\"post_id\" must be a valid GUID"
        );
        assert!(CommentIdPath("1".into()).validate().is_err());
        assert!(FolloweePath(raw.into()).validate().is_ok());
    }
}
