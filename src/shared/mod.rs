//! Shared Module
//!
//! This module contains the types exchanged with API clients: request bodies,
//! their validation rules, and the JSON shapes returned for profiles and
//! posts. Nothing in here touches the database or the HTTP stack.

/// Shared error types
pub mod error;

/// Input validation helpers
pub mod validation;

/// Profile, experience and education types
pub mod profile;

/// Post, like and comment types
pub mod posts;

/// Re-export commonly used types for convenience
pub use error::{FieldError, SharedError};
pub use profile::{
    Education, EducationRequest, Experience, ExperienceRequest, NewEducation, NewExperience,
    Profile, ProfileFields, ProfileRequest, ProfileUser, SocialLinks,
};
pub use posts::{Comment, CommentRequest, CreatePostRequest, Like, MessageResponse, Post};
