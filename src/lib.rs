//! devconnect - Main Library
//!
//! devconnect is the backend of a developer networking site: people register,
//! describe themselves in a profile (skills, experience, education, social
//! links) and talk to each other through a feed of posts, likes and comments.
//!
//! # Module Structure
//!
//! - **`shared`** - Request/response types and validation rules
//!   - Profile, experience and education types
//!   - Post, like and comment types
//!   - Field-level validation errors
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server and route assembly
//!   - Bearer-token authentication middleware
//!   - SQLite persistence through sqlx
//!   - Error-to-response mapping
//!
//! # Usage
//!
//! ```rust,no_run
//! use devconnect::backend::server::{config::AppConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation failures on incoming requests
//! - `backend::error::BackendError` for everything a handler can return;
//!   it renders itself as a JSON response with the right status code

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
