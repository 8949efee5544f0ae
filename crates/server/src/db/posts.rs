//! Post repository.
//!
//! Every read joins the author so a `Post` always carries its `User`.
//! Lists are ordered `created_at DESC, id ASC`, which the feed relies on
//! as its tie-break.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use weezer_core::{PostId, UserId};

use super::RepositoryError;
use super::users::parse_stored_username;
use crate::models::post::{Post, PostPatch};
use crate::models::user::User;

const SELECT_POSTS: &str = r"
    SELECT p.id, p.title, p.body, p.created_at, p.updated_at,
           u.id AS author_id, u.username AS author_username, u.name AS author_name,
           u.created_at AS author_created_at, u.updated_at AS author_updated_at
    FROM weezer.posts p
    JOIN weezer.users u ON u.id = p.user_id
";

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: PostId,
    title: Option<String>,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: UserId,
    author_username: String,
    author_name: String,
    author_created_at: DateTime<Utc>,
    author_updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = RepositoryError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            author: User {
                id: row.author_id,
                username: parse_stored_username(&row.author_username)?,
                name: row.author_name,
                created_at: row.author_created_at,
                updated_at: row.author_updated_at,
            },
            title: row.title,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_posts(rows: Vec<PostRow>) -> Result<Vec<Post>, RepositoryError> {
    rows.into_iter().map(Post::try_from).collect()
}

/// Repository for post database operations.
pub struct PostRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the posts written by one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(user_id = %author))]
    pub async fn list_by_author(&self, author: UserId) -> Result<Vec<Post>, RepositoryError> {
        let rows: Vec<PostRow> = sqlx::query_as(&format!(
            "{SELECT_POSTS} WHERE p.user_id = $1 ORDER BY p.created_at DESC, p.id ASC"
        ))
        .bind(author)
        .fetch_all(self.pool)
        .await?;

        into_posts(rows)
    }

    /// List the posts written by any of the given users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, authors), fields(authors = authors.len()))]
    pub async fn list_by_authors(&self, authors: &[UserId]) -> Result<Vec<Post>, RepositoryError> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = authors.iter().map(UserId::as_uuid).collect();
        let rows: Vec<PostRow> = sqlx::query_as(&format!(
            "{SELECT_POSTS} WHERE p.user_id = ANY($1) ORDER BY p.created_at DESC, p.id ASC"
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        into_posts(rows)
    }

    /// Get a single post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(post_id = %id))]
    pub async fn get(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        let row: Option<PostRow> = sqlx::query_as(&format!("{SELECT_POSTS} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Post::try_from).transpose()
    }

    /// Insert a post and return its generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the author does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, title, body), fields(user_id = %author))]
    pub async fn create(
        &self,
        author: UserId,
        title: Option<&str>,
        body: &str,
    ) -> Result<PostId, RepositoryError> {
        let (id,): (PostId,) = sqlx::query_as(
            r"
            INSERT INTO weezer.posts (user_id, title, body)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(author)
        .bind(title)
        .bind(body)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "post already exists"))?;

        debug!(post_id = %id, "Created post");
        Ok(id)
    }

    /// Apply a partial update to a post owned by `author`.
    ///
    /// Returns `false` when no row matched (missing post or not the owner).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, patch), fields(post_id = %id, user_id = %author))]
    pub async fn update(
        &self,
        id: PostId,
        author: UserId,
        patch: &PostPatch,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE weezer.posts
            SET title = COALESCE($3, title),
                body = COALESCE($4, body),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(author)
        .bind(patch.title.as_deref())
        .bind(patch.body.as_deref())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a post owned by `author`. Its comments cascade.
    ///
    /// Returns `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(post_id = %id, user_id = %author))]
    pub async fn delete(&self, id: PostId, author: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM weezer.posts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(author)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
