//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use devconnect::backend::middleware::auth_middleware;
//! use devconnect::backend::server::state::AppState;
//!
//! fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
//!     router.route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
