//! Post HTTP Handlers
//!
//! All post endpoints require authentication. Only the author of a post
//! (or comment) may delete it.

use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::error::BackendError;
use crate::backend::extract::{parse_id, JsonBody};
use crate::backend::middleware::AuthUser;
use crate::shared::posts::{Comment, CommentRequest, CreatePostRequest, Like, MessageResponse, Post};

pub const POST_NOT_FOUND_MSG: &str = "Post not found";
pub const NOT_AUTHORIZED_MSG: &str = "User not authorized";
pub const POST_REMOVED_MSG: &str = "Post removed";
pub const ALREADY_LIKED_MSG: &str = "Post already liked";
pub const NOT_LIKED_MSG: &str = "Post has not yet been liked";
pub const COMMENT_NOT_FOUND_MSG: &str = "Comment does not exist";

/// Parse the post id and make sure the post exists
async fn existing_post_id(pool: &SqlitePool, raw: &str) -> Result<Uuid, BackendError> {
    let post_id = parse_id(raw, POST_NOT_FOUND_MSG)?;
    db::get_post_author(pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND_MSG))?;
    Ok(post_id)
}

/// POST /api/posts
pub async fn create_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    JsonBody(request): JsonBody<CreatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    let text = request.validate()?;
    let user = &auth.user;

    let post = db::create_post(&pool, user.id, &text, &user.name, &user.avatar).await?;
    tracing::info!("Post {} created by {}", post.id, user.id);

    Ok(Json(post))
}

/// GET /api/posts
pub async fn list_posts(
    State(pool): State<SqlitePool>,
    _auth: AuthUser,
) -> Result<Json<Vec<Post>>, BackendError> {
    Ok(Json(db::list_posts(&pool).await?))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(pool): State<SqlitePool>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, BackendError> {
    let post_id = parse_id(&id, POST_NOT_FOUND_MSG)?;

    db::get_post(&pool, post_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND_MSG))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let post_id = parse_id(&id, POST_NOT_FOUND_MSG)?;
    let author = db::get_post_author(&pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND_MSG))?;

    if author != auth.user.id {
        tracing::warn!("User {} tried to delete post {} of {}", auth.user.id, post_id, author);
        return Err(BackendError::unauthorized(NOT_AUTHORIZED_MSG));
    }

    db::delete_post(&pool, post_id).await?;
    tracing::info!("Post {} removed", post_id);

    Ok(Json(MessageResponse::new(POST_REMOVED_MSG)))
}

/// PATCH /api/posts/like/{id}
///
/// # Returns
/// The post's likes, newest first
pub async fn like_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, BackendError> {
    let post_id = existing_post_id(&pool, &id).await?;

    if !db::add_like(&pool, post_id, auth.user.id).await? {
        return Err(BackendError::bad_request(ALREADY_LIKED_MSG));
    }

    Ok(Json(db::get_likes(&pool, post_id).await?))
}

/// PATCH /api/posts/unlike/{id}
pub async fn unlike_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, BackendError> {
    let post_id = existing_post_id(&pool, &id).await?;

    if !db::remove_like(&pool, post_id, auth.user.id).await? {
        return Err(BackendError::bad_request(NOT_LIKED_MSG));
    }

    Ok(Json(db::get_likes(&pool, post_id).await?))
}

/// POST /api/posts/comment/{id}
///
/// # Returns
/// The post's comments, newest first
pub async fn add_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<CommentRequest>,
) -> Result<Json<Vec<Comment>>, BackendError> {
    let text = request.validate()?;
    let post_id = existing_post_id(&pool, &id).await?;
    let user = &auth.user;

    let comment = db::add_comment(&pool, post_id, user.id, &user.name, &user.avatar, &text).await?;
    tracing::info!("Comment {} added to post {}", comment.id, post_id);

    Ok(Json(db::get_comments(&pool, post_id).await?))
}

/// DELETE /api/posts/comment/{p_id}/{comment_id}
pub async fn delete_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path((p_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, BackendError> {
    let post_id = existing_post_id(&pool, &p_id).await?;
    let comment_id = parse_id(&comment_id, COMMENT_NOT_FOUND_MSG)?;

    let comment = db::get_comment(&pool, post_id, comment_id)
        .await?
        .ok_or_else(|| BackendError::not_found(COMMENT_NOT_FOUND_MSG))?;

    if comment.user != auth.user.id {
        tracing::warn!("User {} tried to delete comment {} of {}", auth.user.id, comment_id, comment.user);
        return Err(BackendError::unauthorized(NOT_AUTHORIZED_MSG));
    }

    db::remove_comment(&pool, post_id, comment_id).await?;

    Ok(Json(db::get_comments(&pool, post_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::create_user;
    use crate::backend::middleware::AuthenticatedUser;
    use crate::backend::server::state::test_state;
    use axum::http::StatusCode;

    async fn user(pool: &SqlitePool, email: &str) -> AuthUser {
        let user = create_user(pool, "A", email, "hash", "avatar").await.unwrap();
        AuthUser(AuthenticatedUser {
            user,
            token: "token".to_string(),
        })
    }

    fn text(body: &str) -> CreatePostRequest {
        CreatePostRequest {
            text: Some(body.to_string()),
        }
    }

    #[tokio::test]
    async fn test_delete_by_non_author() {
        let state = test_state().await;
        let pool = state.db_pool.clone();
        let author = user(&pool, "a@x.com").await;
        let other = user(&pool, "b@x.com").await;

        let Json(post) = create_post(State(pool.clone()), author.clone(), JsonBody(text("hi")))
            .await
            .unwrap();

        let err = delete_post(State(pool.clone()), other, Path(post.id.to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert!(db::get_post(&pool, post.id).await.unwrap().is_some());

        let Json(msg) = delete_post(State(pool.clone()), author, Path(post.id.to_string()))
            .await
            .unwrap();
        assert_eq!(msg.msg, POST_REMOVED_MSG);
    }

    #[tokio::test]
    async fn test_like_unknown_post() {
        let state = test_state().await;
        let auth = user(&state.db_pool, "a@x.com").await;

        let err = like_post(State(state.db_pool.clone()), auth, Path(Uuid::new_v4().to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.body(), serde_json::json!({ "msg": POST_NOT_FOUND_MSG }));
    }

    #[tokio::test]
    async fn test_unlike_without_like() {
        let state = test_state().await;
        let pool = state.db_pool.clone();
        let auth = user(&pool, "a@x.com").await;
        let Json(post) = create_post(State(pool.clone()), auth.clone(), JsonBody(text("hi")))
            .await
            .unwrap();

        let err = unlike_post(State(pool), auth, Path(post.id.to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body(), serde_json::json!({ "msg": NOT_LIKED_MSG }));
    }

    #[tokio::test]
    async fn test_delete_missing_comment() {
        let state = test_state().await;
        let pool = state.db_pool.clone();
        let auth = user(&pool, "a@x.com").await;
        let Json(post) = create_post(State(pool.clone()), auth.clone(), JsonBody(text("hi")))
            .await
            .unwrap();

        let err = delete_comment(
            State(pool),
            auth,
            Path((post.id.to_string(), Uuid::new_v4().to_string())),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.body(), serde_json::json!({ "msg": COMMENT_NOT_FOUND_MSG }));
    }
}
