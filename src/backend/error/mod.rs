//! Backend Error Module
//!
//! This module defines the error type returned by every handler and store
//! call site in the backend, and how it is turned into an HTTP response.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Response Shapes
//!
//! - Validation and conflict errors: `{"errors": [{"msg": "...", "param": "..."}]}`
//! - Everything else: `{"msg": "..."}`
//!
//! Internal failures (database, hashing, signing) are logged and reported
//! to the client only as `{"msg": "Server Error"}` with status 500.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
