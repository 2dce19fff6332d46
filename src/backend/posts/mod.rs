//! Posts Module
//!
//! The feed: posts, likes (at most one per user and post) and comments.
//! Author name and avatar are copied onto each post and comment when it is
//! written.
//!
//! - **`db`** - SQLite storage
//! - **`handlers`** - `/api/posts` endpoints

/// Database operations for posts, likes and comments
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    add_comment, create_post, delete_comment, delete_post, get_post, like_post, list_posts,
    unlike_post,
};
