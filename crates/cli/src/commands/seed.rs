//! Seed the database with demo data.
//!
//! Creates `alice`, `bob` and `carol`, a few posts each with comments, and
//! the follow edges `alice -> bob` and `alice -> carol`. Running it again
//! changes nothing: existing users are reused, posts are only written for
//! users that have none, and duplicate follows are ignored.

use sqlx::PgPool;
use tracing::info;

use weezer_core::{UserId, Username};
use weezer_server::db::{
    CommentRepository, FollowRepository, PostRepository, RepositoryError, UserRepository,
};
use weezer_server::models::User;
use weezer_server::services::auth::AuthService;
use weezer_server::validation::{Validate, ValidationError};
use weezer_server::validation::requests::SignupBody;

use super::{CommandError, connect};

/// Password shared by every demo account.
const DEMO_PASSWORD: &str = "weezer-demo-pass";

struct DemoUser {
    username: &'static str,
    name: &'static str,
    posts: &'static [(Option<&'static str>, &'static str)],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        username: "alice",
        name: "Alice Liddell",
        posts: &[(
            Some("Down the rabbit hole"),
            "Followed a very punctual rabbit today. Would not recommend the fall.",
        )],
    },
    DemoUser {
        username: "bob",
        name: "Bob Builder",
        posts: &[
            (
                Some("Foundations"),
                "Poured the slab for the new shed this morning. Curing takes a week.",
            ),
            (
                None,
                "Reminder that measuring twice is cheaper than cutting three times.",
            ),
        ],
    },
    DemoUser {
        username: "carol",
        name: "Carol Danvers",
        posts: &[
            (
                Some("Flight log"),
                "Clocked a new personal best on the morning loop around the bay.",
            ),
            (
                None,
                "Anyone know a good mechanic for jet engines? Asking for a friend.",
            ),
        ],
    },
];

/// Seed demo users, posts, comments and follows.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let mut users = Vec::with_capacity(DEMO_USERS.len());
    for demo in DEMO_USERS {
        users.push(ensure_user(&pool, demo).await?);
    }

    // alice comments on everyone else's posts
    let commenter = users.first().map(|u| u.id);
    for (demo, user) in DEMO_USERS.iter().zip(&users) {
        let comment_as = commenter.filter(|id| *id != user.id);
        seed_posts(&pool, demo, user.id, comment_as).await?;
    }

    if let [alice, bob, carol] = users.as_slice() {
        ensure_follow(&pool, alice.id, bob.id).await?;
        ensure_follow(&pool, alice.id, carol.id).await?;
    }

    info!(users = users.len(), "Seed complete");
    print_login_hint(&users);
    Ok(())
}

/// Show the demo logins on stdout only, never in the log stream.
#[allow(clippy::print_stdout)]
fn print_login_hint(users: &[User]) {
    println!("{}", login_hint(users));
}

fn login_hint(users: &[User]) -> String {
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    format!(
        "Demo accounts: {} (password: {DEMO_PASSWORD})",
        names.join(", ")
    )
}

async fn ensure_user(pool: &PgPool, demo: &DemoUser) -> Result<User, CommandError> {
    let username = Username::parse(demo.username)
        .map_err(|e| ValidationError::new("username", e.to_string()))?;

    if let Some((user, _)) = UserRepository::new(pool)
        .get_by_username_with_hash(&username)
        .await?
    {
        info!(username = %user.username, "User exists, skipping");
        return Ok(user);
    }

    let signup = SignupBody {
        username: Some(demo.username.to_owned()),
        name: Some(demo.name.to_owned()),
        password: Some(DEMO_PASSWORD.to_owned()),
    }
    .validate()?;

    let user = AuthService::new(pool).register(signup).await?;
    info!(username = %user.username, "Created user");
    Ok(user)
}

async fn seed_posts(
    pool: &PgPool,
    demo: &DemoUser,
    author: UserId,
    comment_as: Option<UserId>,
) -> Result<(), CommandError> {
    let posts = PostRepository::new(pool);
    if !posts.list_by_author(author).await?.is_empty() {
        info!(username = demo.username, "Posts exist, skipping");
        return Ok(());
    }

    let comments = CommentRepository::new(pool);
    for (title, body) in demo.posts {
        let post_id = posts.create(author, *title, body).await?;

        if let Some(commenter) = comment_as {
            comments
                .create(commenter, post_id, "Great post, thanks for sharing this!")
                .await?;
        }
    }

    info!(username = demo.username, posts = demo.posts.len(), "Created posts");
    Ok(())
}

async fn ensure_follow(
    pool: &PgPool,
    follower: UserId,
    followee: UserId,
) -> Result<(), CommandError> {
    match FollowRepository::new(pool).follow(follower, followee).await {
        Ok(()) | Err(RepositoryError::Conflict(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn user(name: &str) -> User {
        User {
            id: UserId::new(Uuid::new_v4()),
            username: Username::parse(name).unwrap(),
            name: name.to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_login_hint_lists_accounts() {
        let hint = login_hint(&[user("alice"), user("bob")]);
        assert_eq!(
            hint,
            "Demo accounts: alice, bob (password: weezer-demo-pass)"
        );
    }
}
