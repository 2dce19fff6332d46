//! Server Module
//!
//! This module contains the code for configuring and initializing the Axum
//! HTTP server.
//!
//! - **`config`** - Configuration loading and the SQLite pool
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`init`** - App creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - Configuration loading (file, environment, database)
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: defaults, config file, then environment
//! 2. **Database**: open the pool and run migrations
//! 3. **State Creation**: pool, token keys and password hashing cost
//! 4. **Router Creation**: routes, auth middleware, CORS and tracing layers
//!
//! # Example
//!
//! ```rust,no_run
//! use devconnect::backend::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{AppConfig, ConfigError};
pub use init::{build_app, create_app};
pub use state::AppState;
