//! Post domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use weezer_core::PostId;

use super::comment::{Comment, CommentView};
use super::user::{User, UserView};

/// A post, loaded together with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub author: User,
    pub title: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a post owned by the acting user.
///
/// `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostPatch {
    /// Whether the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

/// JSON shape of a post with its author and comments embedded.
///
/// Comments are ordered oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: PostId,
    pub title: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserView,
    pub comments: Vec<CommentView>,
}

impl PostView {
    /// Hydrate a post with the comments that belong to it.
    #[must_use]
    pub fn new(post: Post, comments: Vec<Comment>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            created_at: post.created_at,
            updated_at: post.updated_at,
            user: post.author.into(),
            comments: comments.into_iter().map(CommentView::from).collect(),
        }
    }
}
