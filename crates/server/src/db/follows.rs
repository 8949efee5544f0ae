//! Follow edge repository.
//!
//! An edge `(follower_id, followee_id)` means the follower sees the
//! followee's posts in their feed. Self-edges are rejected by a CHECK
//! constraint; callers check first so the client gets a clear message.

use sqlx::PgPool;
use tracing::{debug, instrument};

use weezer_core::UserId;

use super::RepositoryError;
use super::users::UserRow;
use crate::models::user::User;

/// Repository for follow edges.
pub struct FollowRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FollowRepository<'a> {
    /// Create a new follow repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create the edge `follower -> followee`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the edge already exists.
    /// Returns `RepositoryError::NotFound` if either user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self), fields(follower = %follower, followee = %followee))]
    pub async fn follow(&self, follower: UserId, followee: UserId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO weezer.follows (follower_id, followee_id) VALUES ($1, $2)")
            .bind(follower)
            .bind(followee)
            .execute(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, "already following"))?;

        debug!("Created follow edge");
        Ok(())
    }

    /// Remove the edge `follower -> followee`.
    ///
    /// Returns `false` if there was no such edge.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(follower = %follower, followee = %followee))]
    pub async fn unfollow(
        &self,
        follower: UserId,
        followee: UserId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM weezer.follows WHERE follower_id = $1 AND followee_id = $2")
                .bind(follower)
                .bind(followee)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Users that `user` follows, most recently followed first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn following(&self, user: UserId) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"
            SELECT u.id, u.username, u.name, u.created_at, u.updated_at
            FROM weezer.follows f
            JOIN weezer.users u ON u.id = f.followee_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at DESC, u.id ASC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Users that follow `user`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn followers(&self, user: UserId) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"
            SELECT u.id, u.username, u.name, u.created_at, u.updated_at
            FROM weezer.follows f
            JOIN weezer.users u ON u.id = f.follower_id
            WHERE f.followee_id = $1
            ORDER BY f.created_at DESC, u.id ASC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Whether the edge `follower -> followee` exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(follower = %follower, followee = %followee))]
    pub async fn is_following(
        &self,
        follower: UserId,
        followee: UserId,
    ) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS (
                SELECT 1 FROM weezer.follows
                WHERE follower_id = $1 AND followee_id = $2
            )
            ",
        )
        .bind(follower)
        .bind(followee)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }
}
