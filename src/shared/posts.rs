//! Post types
//!
//! Posts carry a snapshot of their author's name and avatar taken when the
//! post (or comment) was written, so the feed renders without looking users
//! up again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::Checks;

/// One user's like on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user: Uuid,
}

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Author of the comment
    pub user: Uuid,
    pub name: String,
    pub avatar: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

/// A post with its likes and comments, both most-recent-first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Author of the post
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/posts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub text: Option<String>,
}

impl CreatePostRequest {
    /// Returns the post text
    pub fn validate(&self) -> Result<String, SharedError> {
        validate_text(self.text.as_deref())
    }
}

/// Body of `POST /api/posts/comment/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentRequest {
    pub text: Option<String>,
}

impl CommentRequest {
    /// Returns the comment text
    pub fn validate(&self) -> Result<String, SharedError> {
        validate_text(self.text.as_deref())
    }
}

fn validate_text(text: Option<&str>) -> Result<String, SharedError> {
    Checks::new()
        .require("text", text, "Text is required")
        .finish()?;
    Ok(text.unwrap_or_default().to_string())
}

/// `{"msg": "..."}` body used for plain confirmations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_text_required() {
        let error = CreatePostRequest { text: Some("  ".into()) }
            .validate()
            .unwrap_err();
        assert_eq!(error.field_errors()[0].msg, "Text is required");
    }

    #[test]
    fn test_comment_text_kept_verbatim() {
        let text = CommentRequest { text: Some(" Nice post! ".into()) }
            .validate()
            .unwrap();
        assert_eq!(text, " Nice post! ");
    }

    #[test]
    fn test_post_serializes_likes_as_user_objects() {
        let user = Uuid::new_v4();
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            user,
            text: "hello".into(),
            name: "A".into(),
            avatar: "https://example.com/a.png".into(),
            likes: vec![Like { user }],
            comments: vec![],
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["likes"][0]["user"], serde_json::json!(user.to_string()));
        assert_eq!(json["comments"], serde_json::json!([]));
    }
}
