//! Backend request and response bodies.

use bitnbolt_core::{
    Admin, AdminId, AdminRole, AdminStats, Pagination, Permission, Vendor, VendorStats,
};
use serde::{Deserialize, Serialize};

use super::BackendError;

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

const fn default_success() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    pub(crate) const fn empty() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }

    /// The `data` payload, required.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Parse` if the backend sent no `data`.
    pub fn into_data(self) -> Result<T, BackendError> {
        self.data
            .ok_or_else(|| BackendError::Parse("Response is missing data".to_string()))
    }
}

// =============================================================================
// Auth
// =============================================================================

/// `GET /api/admin/session`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    pub admin: Admin,
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /api/admin/login`
#[derive(Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub admin: Option<Admin>,
}

impl std::fmt::Debug for LoginData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginData")
            .field("token", &"[REDACTED]")
            .field("admin", &self.admin)
            .finish()
    }
}

#[derive(Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub password: &'a str,
}

// =============================================================================
// Admins
// =============================================================================

/// `GET /api/admin/list`
#[derive(Debug, Clone, Deserialize)]
pub struct AdminList {
    pub admins: Vec<Admin>,
    #[serde(default)]
    pub stats: AdminStats,
}

/// Body of `POST /api/admin/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAdmin {
    pub admin_name: String,
    pub email: String,
    pub role: AdminRole,
    pub permissions: Vec<Permission>,
}

/// `POST /api/admin/create` answer. The password is shown once and never stored.
#[derive(Clone, Deserialize)]
pub struct CreatedAdmin {
    #[serde(rename = "temporaryPassword")]
    pub temporary_password: String,
}

impl std::fmt::Debug for CreatedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedAdmin")
            .field("temporary_password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `PUT /api/admin/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminUpdate {
    #[serde(rename = "adminId")]
    pub admin_id: AdminId,
    pub admin_name: String,
    pub email: String,
    pub role: AdminRole,
    pub permissions: Vec<Permission>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

// =============================================================================
// Vendors
// =============================================================================

/// `GET /api/admin/vendors/list`
#[derive(Debug, Clone, Deserialize)]
pub struct VendorPage {
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub stats: VendorStats,
    #[serde(default)]
    pub pagination: Pagination,
}

// =============================================================================
// Profile
// =============================================================================

/// Body of `PUT /api/admin/profile`. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct ProfileBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_name: Option<&'a str>,
    #[serde(rename = "currentPassword", skip_serializing_if = "Option::is_none")]
    pub current_password: Option<&'a str>,
    #[serde(rename = "newPassword", skip_serializing_if = "Option::is_none")]
    pub new_password: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct ProfileImageBody<'a> {
    #[serde(rename = "imageData")]
    pub image_data: &'a str,
}
