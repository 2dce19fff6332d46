/**
 * User Model and Database Operations
 *
 * This module handles user records and the list of bearer tokens each user
 * currently has active. A user may hold several tokens at once (one per
 * signed-in device); removing a token revokes it.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Avatar URL derived from the email at registration
    pub avatar: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `name` - Display name
/// * `email` - User email
/// * `password_hash` - Hashed password
/// * `avatar` - Avatar URL
///
/// # Returns
/// Created user or error. A duplicate email surfaces as a unique-constraint
/// database error.
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
    avatar: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, avatar, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, name, email, password_hash, avatar, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(avatar)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, avatar, created_at, updated_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Append a token to the user's active tokens
pub async fn add_token(pool: &SqlitePool, user_id: Uuid, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_tokens (user_id, token, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(token)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

/// Find the user with `user_id` only if `token` is still among their active tokens
pub async fn find_user_by_token(
    pool: &SqlitePool,
    user_id: Uuid,
    token: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.name, u.email, u.password_hash, u.avatar, u.created_at, u.updated_at
        FROM users u
        INNER JOIN user_tokens t ON t.user_id = u.id
        WHERE u.id = ? AND t.token = ?
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Revoke a single token
///
/// # Returns
/// Whether the token was active
pub async fn revoke_token(pool: &SqlitePool, user_id: Uuid, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_tokens WHERE user_id = ? AND token = ?")
        .bind(user_id)
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Revoke every token of a user
///
/// # Returns
/// Number of tokens revoked
pub async fn revoke_all_tokens(pool: &SqlitePool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_tokens WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete a user
///
/// Tokens and the profile (with its experience and education entries) go
/// with the user through `ON DELETE CASCADE`. Posts, likes and comments
/// only hold a weak reference and are kept.
///
/// # Returns
/// Whether a user was deleted
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
