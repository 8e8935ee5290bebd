//! Domain models for the admin dashboard.

pub mod session;

pub use session::{AuthenticatedAdmin, keys as session_keys};
