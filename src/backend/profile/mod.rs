//! Profile Module
//!
//! One profile per user: headline, skills, social links and the
//! experience and education histories.
//!
//! - **`db`** - SQLite storage for profiles and their entries
//! - **`handlers`** - `/api/profile` endpoints

/// Database operations for profiles
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    add_education, add_experience, delete_account, delete_education, delete_experience,
    get_my_profile, get_profile_by_user, list_profiles, upsert_profile,
};
