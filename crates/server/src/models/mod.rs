//! Domain models for Weezer.
//!
//! Records returned by the repositories are plain data. The `*View` types
//! are the JSON shapes handlers respond with.

pub mod comment;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentView};
pub use post::{Post, PostPatch, PostView};
pub use user::{User, UserView};
