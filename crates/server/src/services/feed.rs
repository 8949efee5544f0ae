//! Feed aggregation.
//!
//! The feed is recomputed on every request: the acting user's followees,
//! their posts, the comments on those posts, newest post first.

use sqlx::PgPool;
use tracing::{debug, instrument};

use weezer_core::{PostId, UserId};

use super::posts::attach_comments;
use crate::db::{CommentRepository, FollowRepository, PostRepository, RepositoryError};
use crate::models::{Comment, Post, PostView};

/// Builds a user's feed.
pub struct FeedService<'a> {
    follows: FollowRepository<'a>,
    posts: PostRepository<'a>,
    comments: CommentRepository<'a>,
}

impl<'a> FeedService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            follows: FollowRepository::new(pool),
            posts: PostRepository::new(pool),
            comments: CommentRepository::new(pool),
        }
    }

    /// Posts by everyone `user` follows, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any query fails.
    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn for_user(&self, user: UserId) -> Result<Vec<PostView>, RepositoryError> {
        let followees: Vec<UserId> = self
            .follows
            .following(user)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();

        let posts = self.posts.list_by_authors(&followees).await?;
        let post_ids: Vec<PostId> = posts.iter().map(|p| p.id).collect();
        let comments = self.comments.list_for_posts(&post_ids).await?;

        debug!(
            followees = followees.len(),
            posts = posts.len(),
            comments = comments.len(),
            "Assembled feed"
        );
        Ok(assemble(posts, comments))
    }
}

/// Hydrate posts with their comments and order them newest first.
#[must_use]
pub fn assemble(posts: Vec<Post>, comments: Vec<Comment>) -> Vec<PostView> {
    let mut feed = attach_comments(posts, comments);
    sort_newest_first(&mut feed);
    feed
}

/// Sort by `created_at` descending. Stable: equal timestamps keep their order.
pub fn sort_newest_first(feed: &mut [PostView]) {
    feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::super::posts::fixtures::{comment, post, user};
    use super::*;

    #[test]
    fn test_newest_first() {
        let x = user("xavier");
        let p1 = post(&x, "post one body text here", 1);
        let p2 = post(&x, "post two body text here", 3);
        let p3 = post(&x, "post three body text here", 2);

        let feed = assemble(vec![p1.clone(), p2.clone(), p3.clone()], vec![]);
        let ids: Vec<PostId> = feed.iter().map(|p| p.id).collect();

        assert_eq!(ids, [p2.id, p3.id, p1.id]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let x = user("xavier");
        let y = user("yvonne");
        let a = post(&x, "same instant from xavier", 5);
        let b = post(&y, "same instant from yvonne", 5);
        let older = post(&y, "an older post from yvonne", 1);

        let feed = assemble(vec![older.clone(), a.clone(), b.clone()], vec![]);
        let ids: Vec<PostId> = feed.iter().map(|p| p.id).collect();
        assert_eq!(ids, [a.id, b.id, older.id]);

        let feed = assemble(vec![b.clone(), a.clone(), older.clone()], vec![]);
        let ids: Vec<PostId> = feed.iter().map(|p| p.id).collect();
        assert_eq!(ids, [b.id, a.id, older.id]);
    }

    #[test]
    fn test_mixes_authors_and_keeps_comments() {
        let x = user("xavier");
        let y = user("yvonne");
        let me = user("me_myself");
        let px = post(&x, "xavier wrote this post", 10);
        let py = post(&y, "yvonne wrote this post", 20);
        let c = comment(&me, &px, "nice post xavier, really", 30);

        let feed = assemble(vec![px.clone(), py.clone()], vec![c]);

        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].user.username, "yvonne");
        assert!(feed[0].comments.is_empty());
        assert_eq!(feed[1].user.username, "xavier");
        assert_eq!(feed[1].comments[0].user.username, "me_myself");
    }

    #[test]
    fn test_empty_feed() {
        assert!(assemble(vec![], vec![]).is_empty());
    }
}
