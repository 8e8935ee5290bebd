//! Admin account records as returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdminId, AdminRole, Email, Permission};

/// An admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub email: Email,
    /// Display name.
    pub admin_name: String,
    pub role: AdminRole,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(rename = "lastLogin", default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

impl Admin {
    /// Whether this admin may create, edit or delete other admins.
    #[must_use]
    pub const fn can_manage_admins(&self) -> bool {
        self.role.can_manage_admins()
    }

    /// Whether the account carries the given permission tag.
    #[must_use]
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

/// Summary counters returned alongside the admin list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total: u64,
    pub active: u64,
    #[serde(rename = "superAdmins")]
    pub super_admins: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_session_admin() {
        let admin: Admin = serde_json::from_value(json!({
            "id": "a1",
            "email": "root@bitnbolt.in",
            "admin_name": "Asha Rao",
            "role": "super_admin",
            "permissions": ["manage_admins"],
            "isActive": true,
            "lastLogin": "2026-10-01T09:30:00Z",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-02T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(admin.admin_name, "Asha Rao");
        assert!(admin.can_manage_admins());
        assert!(admin.has_permission(&Permission::ManageAdmins));
        assert!(admin.profile_image.is_none());
        assert!(admin.last_login.is_some());
    }

    #[test]
    fn test_deserialize_minimal_admin() {
        let admin: Admin = serde_json::from_value(json!({
            "id": "a2",
            "email": "ops@bitnbolt.in",
            "admin_name": "Ops",
            "role": "admin"
        }))
        .unwrap();

        assert!(admin.is_active);
        assert!(admin.permissions.is_empty());
        assert!(!admin.can_manage_admins());
    }

    #[test]
    fn test_admin_stats_field_names() {
        let stats: AdminStats =
            serde_json::from_value(json!({"total": 4, "active": 3, "superAdmins": 1})).unwrap();
        assert_eq!(stats.super_admins, 1);
    }
}
