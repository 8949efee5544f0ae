//! Post reads and writes with comment hydration.
//!
//! Every write is followed by a reload through [`PostService::get`], the
//! same read `GET /profile/{id}` uses, so responses always show what was
//! stored.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;

use weezer_core::{PostId, UserId};

use crate::db::{CommentRepository, PostRepository, RepositoryError};
use crate::models::{Comment, Post, PostPatch, PostView};
use crate::validation::requests::NewPost;

/// Service for the acting user's posts.
pub struct PostService<'a> {
    posts: PostRepository<'a>,
    comments: CommentRepository<'a>,
}

impl<'a> PostService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            posts: PostRepository::new(pool),
            comments: CommentRepository::new(pool),
        }
    }

    /// All posts written by `author`, newest first, with comments.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    #[instrument(skip(self), fields(user_id = %author))]
    pub async fn list_by_author(&self, author: UserId) -> Result<Vec<PostView>, RepositoryError> {
        let posts = self.posts.list_by_author(author).await?;
        self.hydrate(posts).await
    }

    /// A single post with comments.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    #[instrument(skip(self), fields(post_id = %id))]
    pub async fn get(&self, id: PostId) -> Result<Option<PostView>, RepositoryError> {
        let Some(post) = self.posts.get(id).await? else {
            return Ok(None);
        };
        let comments = self.comments.list_for_posts(&[id]).await?;
        Ok(Some(PostView::new(post, comments)))
    }

    /// Create a post and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the author no longer exists or
    /// the post vanished before it could be reloaded.
    #[instrument(skip(self, new_post), fields(user_id = %author))]
    pub async fn create(&self, author: UserId, new_post: NewPost) -> Result<PostView, RepositoryError> {
        let id = self
            .posts
            .create(author, new_post.title.as_deref(), &new_post.body)
            .await?;

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Apply `patch` to a post owned by `author`.
    ///
    /// Returns `None` if the post does not exist or belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    #[instrument(skip(self, patch), fields(post_id = %id, user_id = %author))]
    pub async fn update(
        &self,
        id: PostId,
        author: UserId,
        patch: &PostPatch,
    ) -> Result<Option<PostView>, RepositoryError> {
        if !self.posts.update(id, author, patch).await? {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Delete a post owned by `author`. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, id: PostId, author: UserId) -> Result<bool, RepositoryError> {
        self.posts.delete(id, author).await
    }

    /// Attach comments to posts with a single batched query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the comment query fails.
    pub async fn hydrate(&self, posts: Vec<Post>) -> Result<Vec<PostView>, RepositoryError> {
        let ids: Vec<PostId> = posts.iter().map(|p| p.id).collect();
        let comments = self.comments.list_for_posts(&ids).await?;
        Ok(attach_comments(posts, comments))
    }
}

/// Group comments under their posts, keeping both input orders.
#[must_use]
pub fn attach_comments(posts: Vec<Post>, comments: Vec<Comment>) -> Vec<PostView> {
    let mut by_post: HashMap<PostId, Vec<Comment>> = HashMap::new();
    for comment in comments {
        by_post.entry(comment.post_id).or_default().push(comment);
    }

    posts
        .into_iter()
        .map(|post| {
            let comments = by_post.remove(&post.id).unwrap_or_default();
            PostView::new(post, comments)
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    use weezer_core::{CommentId, PostId, UserId, Username};

    use crate::models::{Comment, Post, User};

    pub fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0)
            .single()
            .unwrap_or_default()
    }

    pub fn user(name: &str) -> User {
        User {
            id: UserId::new(Uuid::new_v4()),
            username: Username::parse(name).unwrap_or_else(|_| panic!("bad fixture {name}")),
            name: name.to_uppercase(),
            created_at: at(0),
            updated_at: at(0),
        }
    }

    pub fn post(author: &User, body: &str, created: i64) -> Post {
        Post {
            id: PostId::new(Uuid::new_v4()),
            author: author.clone(),
            title: None,
            body: body.to_string(),
            created_at: at(created),
            updated_at: at(created),
        }
    }

    pub fn comment(author: &User, post: &Post, body: &str, created: i64) -> Comment {
        Comment {
            id: CommentId::new(Uuid::new_v4()),
            post_id: post.id,
            author: author.clone(),
            body: body.to_string(),
            created_at: at(created),
            updated_at: at(created),
        }
    }
}
