//! Comment domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use weezer_core::{CommentId, PostId};

use super::user::{User, UserView};

/// A comment on a post, loaded together with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: User,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// JSON shape of a comment with its author embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub post_id: PostId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserView,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            body: comment.body,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            user: comment.author.into(),
        }
    }
}
