//! Comment writes.

use sqlx::PgPool;
use tracing::instrument;

use weezer_core::{CommentId, PostId, UserId};

use crate::db::{CommentRepository, RepositoryError};
use crate::models::CommentView;
use crate::validation::requests::NewComment;

/// Service for commenting on posts.
pub struct CommentService<'a> {
    comments: CommentRepository<'a>,
}

impl<'a> CommentService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            comments: CommentRepository::new(pool),
        }
    }

    /// Comment on `post` as `author` and return the stored comment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post does not exist.
    #[instrument(skip(self, new_comment), fields(user_id = %author, post_id = %post))]
    pub async fn create(
        &self,
        author: UserId,
        post: PostId,
        new_comment: NewComment,
    ) -> Result<CommentView, RepositoryError> {
        let id = self
            .comments
            .create(author, post, &new_comment.body)
            .await?;

        self.comments
            .get(id)
            .await?
            .map(CommentView::from)
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a comment written by `author`. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, id: CommentId, author: UserId) -> Result<bool, RepositoryError> {
        self.comments.delete(id, author).await
    }
}
