//! Backend Module
//!
//! This module contains all server-side code: an Axum HTTP server exposing
//! the registration, authentication, profile and post endpoints, backed by
//! SQLite through sqlx.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route table and router assembly
//! - **`auth`** - Users, bearer tokens, register/login/logout handlers
//! - **`profile`** - Profile storage and handlers
//! - **`posts`** - Post, like and comment storage and handlers
//! - **`middleware`** - Bearer-token authentication
//! - **`extract`** - JSON body extractor with API-shaped rejections
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Users, sessions, auth handlers
//! ├── profile/        - Profiles
//! ├── posts/          - Posts, likes, comments
//! ├── middleware/     - Request middleware
//! ├── extract.rs      - Request extractors
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! HTTP request → trace layer → auth middleware (protected routes only) →
//! handler → store → JSON response. Every failure is a `BackendError`,
//! rendered as `{"errors": [...]}` or `{"msg": "..."}`.
//!
//! # State Management
//!
//! `AppState` holds the connection pool, the token signing keys and the
//! password hashing cost. Handlers pull only what they need through
//! `FromRef`. There is no other shared state.

/// Server initialization, state and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// User profiles
pub mod profile;

/// Posts, likes and comments
pub mod posts;

/// Request middleware
pub mod middleware;

/// Request extractors
pub mod extract;

/// Backend error types
pub mod error;
