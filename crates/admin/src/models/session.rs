//! Session-related types for admin authentication.

use bitnbolt_core::Admin;
use secrecy::SecretString;

/// An admin whose token the backend has just confirmed.
///
/// Handlers receive this from the auth extractors and reuse the token for
/// their own backend calls instead of re-reading the session.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub admin: Admin,
    pub token: SecretString,
}

impl AuthenticatedAdmin {
    #[must_use]
    pub const fn is_super_admin(&self) -> bool {
        self.admin.can_manage_admins()
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Bearer token issued by the backend at sign-in.
    pub const ADMIN_TOKEN: &str = "adminToken";
}
