//! HTTP middleware for the admin dashboard.
//!
//! - `session` - tower-sessions layer holding the backend token
//! - `auth` - extractors that run the session guard for each protected page

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, RequireSuperAdmin, sign_in, sign_out};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
