//! Comment repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use weezer_core::{CommentId, PostId, UserId};

use super::RepositoryError;
use super::users::parse_stored_username;
use crate::models::comment::Comment;
use crate::models::user::User;

const SELECT_COMMENTS: &str = r"
    SELECT c.id, c.post_id, c.body, c.created_at, c.updated_at,
           u.id AS author_id, u.username AS author_username, u.name AS author_name,
           u.created_at AS author_created_at, u.updated_at AS author_updated_at
    FROM weezer.comments c
    JOIN weezer.users u ON u.id = c.user_id
";

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: CommentId,
    post_id: PostId,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: UserId,
    author_username: String,
    author_name: String,
    author_created_at: DateTime<Utc>,
    author_updated_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = RepositoryError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            post_id: row.post_id,
            author: User {
                id: row.author_id,
                username: parse_stored_username(&row.author_username)?,
                name: row.author_name,
                created_at: row.author_created_at,
                updated_at: row.author_updated_at,
            },
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for comment database operations.
pub struct CommentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the comments of several posts in one query, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, posts), fields(posts = posts.len()))]
    pub async fn list_for_posts(&self, posts: &[PostId]) -> Result<Vec<Comment>, RepositoryError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = posts.iter().map(PostId::as_uuid).collect();
        let rows: Vec<CommentRow> = sqlx::query_as(&format!(
            "{SELECT_COMMENTS} WHERE c.post_id = ANY($1) ORDER BY c.created_at ASC, c.id ASC"
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Comment::try_from).collect()
    }

    /// Get a single comment by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(comment_id = %id))]
    pub async fn get(&self, id: CommentId) -> Result<Option<Comment>, RepositoryError> {
        let row: Option<CommentRow> =
            sqlx::query_as(&format!("{SELECT_COMMENTS} WHERE c.id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(Comment::try_from).transpose()
    }

    /// Insert a comment on a post and return its generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post (or author) does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, body), fields(user_id = %author, post_id = %post))]
    pub async fn create(
        &self,
        author: UserId,
        post: PostId,
        body: &str,
    ) -> Result<CommentId, RepositoryError> {
        let (id,): (CommentId,) = sqlx::query_as(
            r"
            INSERT INTO weezer.comments (user_id, post_id, body)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(author)
        .bind(post)
        .bind(body)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "comment already exists"))?;

        debug!(comment_id = %id, "Created comment");
        Ok(id)
    }

    /// Delete a comment written by `author`.
    ///
    /// Returns `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(comment_id = %id, user_id = %author))]
    pub async fn delete(&self, id: CommentId, author: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM weezer.comments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(author)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the comments on a post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_post(&self, post: PostId) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM weezer.comments WHERE post_id = $1")
                .bind(post)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
