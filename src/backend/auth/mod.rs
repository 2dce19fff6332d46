//! Authentication Module
//!
//! This module handles user registration, login, logout and the bookkeeping
//! of active bearer tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model, token list, database operations
//! ├── sessions.rs     - JWT signing and verification
//! ├── avatar.rs       - Gravatar URL derivation
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - POST /api/users
//!     ├── login.rs    - POST /api/auth
//!     ├── me.rs       - GET /api/auth
//!     └── logout.rs   - POST /api/auth/logout[/all]
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → user stored → token issued and recorded
//! 2. **Login**: email, password → credentials checked → new token issued and recorded
//! 3. **Authenticated request**: token verified → user looked up by id *and* token
//! 4. **Logout**: token removed from the user's active list; it stops working
//!    immediately even though its signature is still valid
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Unknown email and wrong password produce the same "Invalid Credentials" error
//! - Password hashes and token lists never appear in responses

/// User model and database operations
pub mod users;

/// JWT token management
pub mod sessions;

/// Avatar derivation
pub mod avatar;

/// HTTP handlers
pub mod handlers;

pub use handlers::{get_me, login, logout, logout_all, signup};
