//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! - **`router`** - Main router creation, middleware and layers
//! - **`api_routes`** - The `/api` route table, split into public and
//!   protected routes
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint table
//! ```
//!
//! # Route Organization
//!
//! 1. **Public Routes** - register, login, profile reads, liveness
//! 2. **Protected Routes** - everything else, behind `auth_middleware`
//! 3. **Fallback Handler** - `404 {"msg": "Not found"}`
//!
//! A path may appear in both groups with different methods (`/api/auth`,
//! `/api/profile`); the auth layer applies only to the protected methods.
//!
//! # Example
//!
//! ```rust,no_run
//! use devconnect::backend::routes::create_router;
//! use devconnect::backend::server::state::AppState;
//!
//! fn app(app_state: AppState) -> axum::Router {
//!     create_router(app_state)
//! }
//! ```

/// Main router creation
pub mod router;

/// API endpoint table
pub mod api_routes;

pub use router::create_router;
