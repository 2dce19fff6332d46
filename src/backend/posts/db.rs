//! Database operations for posts
//!
//! This module contains database operations for posts, likes and comments.
//! All lists come back most-recent-first by insertion sequence.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::shared::posts::{Comment, Like, Post};

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    text: String,
    name: String,
    avatar: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn assemble(row: PostRow, likes: Vec<Like>, comments: Vec<Comment>) -> Post {
    Post {
        id: row.id,
        user: row.user_id,
        text: row.text,
        name: row.name,
        avatar: row.avatar,
        likes,
        comments,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn comment_from_row(row: &SqliteRow) -> Comment {
    Comment {
        id: row.get("id"),
        user: row.get("user_id"),
        name: row.get("name"),
        avatar: row.get("avatar"),
        text: row.get("text"),
        date: row.get("date"),
    }
}

async fn hydrate(pool: &SqlitePool, row: PostRow) -> Result<Post, sqlx::Error> {
    let likes = get_likes(pool, row.id).await?;
    let comments = get_comments(pool, row.id).await?;
    Ok(assemble(row, likes, comments))
}

/// Create a new post
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `user_id` - Author
/// * `text` - Post body
/// * `name` - Author name at the time of writing
/// * `avatar` - Author avatar at the time of writing
pub async fn create_post(
    pool: &SqlitePool,
    user_id: Uuid,
    text: &str,
    name: &str,
    avatar: &str,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO posts (id, user_id, text, name, avatar, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(text)
    .bind(name)
    .bind(avatar)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Post {
        id,
        user: user_id,
        text: text.to_string(),
        name: name.to_string(),
        avatar: avatar.to_string(),
        likes: Vec::new(),
        comments: Vec::new(),
        created_at: now,
        updated_at: now,
    })
}

/// Get all posts, newest first
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, user_id, text, name, avatar, created_at, updated_at
        FROM posts
        ORDER BY seq DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    // Children of every post in one query each, grouped by post
    let mut likes: HashMap<Uuid, Vec<Like>> = HashMap::new();
    for row in sqlx::query("SELECT post_id, user_id FROM post_likes ORDER BY seq DESC")
        .fetch_all(pool)
        .await?
    {
        likes
            .entry(row.get("post_id"))
            .or_default()
            .push(Like { user: row.get("user_id") });
    }

    let mut comments: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    for row in sqlx::query(
        r#"
        SELECT id, post_id, user_id, name, avatar, text, date
        FROM post_comments
        ORDER BY seq DESC
        "#,
    )
    .fetch_all(pool)
    .await?
    {
        comments
            .entry(row.get("post_id"))
            .or_default()
            .push(comment_from_row(&row));
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let post_likes = likes.remove(&row.id).unwrap_or_default();
            let post_comments = comments.remove(&row.id).unwrap_or_default();
            assemble(row, post_likes, post_comments)
        })
        .collect())
}

/// Get a post by ID
pub async fn get_post(pool: &SqlitePool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, user_id, text, name, avatar, created_at, updated_at
        FROM posts
        WHERE id = ?
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(hydrate(pool, row).await?)),
        None => Ok(None),
    }
}

/// Author of a post, if the post exists
pub async fn get_post_author(pool: &SqlitePool, post_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM posts WHERE id = ?")
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// Delete a post together with its likes and comments
///
/// # Returns
/// `true` if the post existed
pub async fn delete_post(pool: &SqlitePool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Record a like
///
/// # Returns
/// `false` if the user already likes the post
pub async fn add_like(pool: &SqlitePool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO post_likes (post_id, user_id)
        VALUES (?, ?)
        ON CONFLICT (post_id, user_id) DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a like
///
/// # Returns
/// `false` if the user had not liked the post
pub async fn remove_like(pool: &SqlitePool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Likes on a post, newest first
pub async fn get_likes(pool: &SqlitePool, post_id: Uuid) -> Result<Vec<Like>, sqlx::Error> {
    let rows = sqlx::query("SELECT user_id FROM post_likes WHERE post_id = ? ORDER BY seq DESC")
        .bind(post_id)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| Like {
            user: row.get("user_id"),
        })
        .collect())
}

/// Add a comment to a post
pub async fn add_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    user_id: Uuid,
    name: &str,
    avatar: &str,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO post_comments (id, post_id, user_id, name, avatar, text, date)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(post_id)
    .bind(user_id)
    .bind(name)
    .bind(avatar)
    .bind(text)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Comment {
        id,
        user: user_id,
        name: name.to_string(),
        avatar: avatar.to_string(),
        text: text.to_string(),
        date: now,
    })
}

/// Comments on a post, newest first
pub async fn get_comments(pool: &SqlitePool, post_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, name, avatar, text, date
        FROM post_comments
        WHERE post_id = ?
        ORDER BY seq DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(comment_from_row).collect())
}

/// Get one comment of a post
pub async fn get_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, name, avatar, text, date
        FROM post_comments
        WHERE post_id = ? AND id = ?
        "#,
    )
    .bind(post_id)
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(comment_from_row))
}

/// Remove one comment of a post
///
/// # Returns
/// `true` if the comment existed
pub async fn remove_comment(pool: &SqlitePool, post_id: Uuid, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM post_comments WHERE post_id = ? AND id = ?")
        .bind(post_id)
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::{create_user, delete_user};
    use crate::backend::server::config::connect_database;
    use pretty_assertions::assert_eq;

    async fn setup() -> SqlitePool {
        connect_database("sqlite::memory:", 1).await.unwrap()
    }

    #[tokio::test]
    async fn test_posts_newest_first() {
        let pool = setup().await;
        let author = Uuid::new_v4();
        let first = create_post(&pool, author, "first", "A", "avatar").await.unwrap();
        let second = create_post(&pool, author, "second", "A", "avatar").await.unwrap();

        let ids: Vec<Uuid> = list_posts(&pool).await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_list_posts_keeps_children_with_their_post() {
        let pool = setup().await;
        let first = create_post(&pool, Uuid::new_v4(), "first", "A", "avatar").await.unwrap();
        let second = create_post(&pool, Uuid::new_v4(), "second", "B", "avatar").await.unwrap();
        let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());

        add_like(&pool, first.id, u1).await.unwrap();
        add_like(&pool, second.id, u1).await.unwrap();
        add_like(&pool, first.id, u2).await.unwrap();
        let c1 = add_comment(&pool, first.id, u1, "C", "c", "one").await.unwrap();
        let c2 = add_comment(&pool, second.id, u2, "D", "d", "two").await.unwrap();
        let c3 = add_comment(&pool, first.id, u2, "D", "d", "three").await.unwrap();

        let posts = list_posts(&pool).await.unwrap();
        assert_eq!(posts.len(), 2);
        let (listed_second, listed_first) = (&posts[0], &posts[1]);

        assert_eq!(listed_first.likes, vec![Like { user: u2 }, Like { user: u1 }]);
        assert_eq!(listed_second.likes, vec![Like { user: u1 }]);
        let first_comments: Vec<Uuid> = listed_first.comments.iter().map(|c| c.id).collect();
        assert_eq!(first_comments, vec![c3.id, c1.id]);
        assert_eq!(listed_second.comments.len(), 1);
        assert_eq!(listed_second.comments[0].id, c2.id);

        let single = get_post(&pool, first.id).await.unwrap().unwrap();
        assert_eq!(single.likes, listed_first.likes);
        assert_eq!(single.comments.len(), listed_first.comments.len());
    }

    #[tokio::test]
    async fn test_like_once_per_user() {
        let pool = setup().await;
        let post = create_post(&pool, Uuid::new_v4(), "hello", "A", "avatar").await.unwrap();
        let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());

        assert!(add_like(&pool, post.id, u1).await.unwrap());
        assert!(!add_like(&pool, post.id, u1).await.unwrap());
        assert!(add_like(&pool, post.id, u2).await.unwrap());

        let likes = get_likes(&pool, post.id).await.unwrap();
        assert_eq!(likes, vec![Like { user: u2 }, Like { user: u1 }]);

        assert!(remove_like(&pool, post.id, u1).await.unwrap());
        assert!(!remove_like(&pool, post.id, u1).await.unwrap());
        assert_eq!(get_likes(&pool, post.id).await.unwrap(), vec![Like { user: u2 }]);
    }

    #[tokio::test]
    async fn test_remove_comment_keeps_order() {
        let pool = setup().await;
        let post = create_post(&pool, Uuid::new_v4(), "hello", "A", "avatar").await.unwrap();
        let user = Uuid::new_v4();

        let c1 = add_comment(&pool, post.id, user, "B", "b", "one").await.unwrap();
        let c2 = add_comment(&pool, post.id, user, "B", "b", "two").await.unwrap();
        let c3 = add_comment(&pool, post.id, user, "B", "b", "three").await.unwrap();

        assert!(remove_comment(&pool, post.id, c2.id).await.unwrap());
        let ids: Vec<Uuid> = get_comments(&pool, post.id).await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![c3.id, c1.id]);

        assert!(get_comment(&pool, post.id, c2.id).await.unwrap().is_none());
        assert_eq!(get_comment(&pool, post.id, c1.id).await.unwrap().unwrap().text, "one");
    }

    #[tokio::test]
    async fn test_delete_post_cascades() {
        let pool = setup().await;
        let post = create_post(&pool, Uuid::new_v4(), "hello", "A", "avatar").await.unwrap();
        add_like(&pool, post.id, Uuid::new_v4()).await.unwrap();
        add_comment(&pool, post.id, Uuid::new_v4(), "B", "b", "hi").await.unwrap();

        assert!(delete_post(&pool, post.id).await.unwrap());
        assert!(get_post(&pool, post.id).await.unwrap().is_none());
        assert!(get_likes(&pool, post.id).await.unwrap().is_empty());
        assert!(get_comments(&pool, post.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_posts_outlive_their_author() {
        let pool = setup().await;
        let user = create_user(&pool, "A", "a@x.com", "hash", "avatar").await.unwrap();
        let post = create_post(&pool, user.id, "hello", &user.name, &user.avatar).await.unwrap();

        delete_user(&pool, user.id).await.unwrap();

        let kept = get_post(&pool, post.id).await.unwrap().unwrap();
        assert_eq!(kept.name, "A");
        assert_eq!(get_post_author(&pool, post.id).await.unwrap(), Some(user.id));
    }
}
