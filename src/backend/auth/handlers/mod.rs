//! Authentication Handlers
//!
//! - **`signup`** - `POST /api/users`
//! - **`login`** - `POST /api/auth`
//! - **`me`** - `GET /api/auth`
//! - **`logout`** - `POST /api/auth/logout`, `POST /api/auth/logout/all`

pub mod types;

pub mod signup;

pub mod login;

pub mod me;

pub mod logout;

pub use types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};

pub use signup::signup;
pub use login::login;
pub use me::get_me;
pub use logout::{logout, logout_all};
