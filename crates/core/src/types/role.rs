//! Admin roles and permission tags.

use serde::{Deserialize, Serialize};

/// Admin role.
///
/// The role, not the permission tags, gates admin management: only
/// [`AdminRole::SuperAdmin`] may create, edit or delete other admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Platform staff with the permissions listed on their account.
    #[default]
    Admin,
    /// Full access including admin management.
    SuperAdmin,
}

impl AdminRole {
    /// All roles, in the order they are offered in forms.
    pub const ALL: [Self; 2] = [Self::Admin, Self::SuperAdmin];

    /// Wire value (`admin` / `super_admin`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Badge label shown in the dashboard (`ADMIN` / `SUPER ADMIN`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER ADMIN",
        }
    }

    /// Whether this role may create, update or delete admins.
    #[must_use]
    pub const fn can_manage_admins(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(format!("invalid admin role: {other}")),
        }
    }
}

/// Permission tag attached to an admin account.
///
/// Tags the dashboard does not know are kept verbatim as
/// [`Permission::Unknown`], so a newer backend never breaks deserialization
/// and saving an admin sends those tags back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Permission {
    ManageUsers,
    ManageVendors,
    ManageOrders,
    ManageProducts,
    ViewAnalytics,
    ManagePayments,
    ManageSettings,
    ManageAdmins,
    Unknown(String),
}

impl Permission {
    /// Every assignable permission, in form order.
    pub const ASSIGNABLE: [Self; 8] = [
        Self::ManageUsers,
        Self::ManageVendors,
        Self::ManageOrders,
        Self::ManageProducts,
        Self::ViewAnalytics,
        Self::ManagePayments,
        Self::ManageSettings,
        Self::ManageAdmins,
    ];

    /// Map a wire tag, keeping tags outside [`Self::ASSIGNABLE`] as-is.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        tag.parse()
            .unwrap_or_else(|_| Self::Unknown(tag.trim().to_string()))
    }

    /// Wire value, e.g. `manage_vendors`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ManageUsers => "manage_users",
            Self::ManageVendors => "manage_vendors",
            Self::ManageOrders => "manage_orders",
            Self::ManageProducts => "manage_products",
            Self::ViewAnalytics => "view_analytics",
            Self::ManagePayments => "manage_payments",
            Self::ManageSettings => "manage_settings",
            Self::ManageAdmins => "manage_admins",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether the dashboard offers this tag as a checkbox.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Human label, e.g. `manage vendors`.
    #[must_use]
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl From<String> for Permission {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        match permission {
            Permission::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses assignable permissions only; use [`Permission::from_tag`] for
/// backend data.
impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ASSIGNABLE
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| format!("invalid permission: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_strings() {
        for role in AdminRole::ALL {
            assert_eq!(role.as_str().parse::<AdminRole>().unwrap(), role);
        }
        assert!("viewer".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_only_super_admin_manages_admins() {
        assert!(AdminRole::SuperAdmin.can_manage_admins());
        assert!(!AdminRole::Admin.can_manage_admins());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(
            serde_json::to_string(&AdminRole::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
        assert_eq!(AdminRole::SuperAdmin.label(), "SUPER ADMIN");
    }

    #[test]
    fn test_unknown_permission_keeps_its_tag() {
        let perms: Vec<Permission> =
            serde_json::from_str(r#"["manage_vendors","export_reports"]"#).unwrap();
        assert_eq!(
            perms,
            vec![
                Permission::ManageVendors,
                Permission::Unknown("export_reports".to_string())
            ]
        );
        assert!(perms.iter().any(|p| !p.is_known()));
        assert_eq!(
            serde_json::to_string(&perms).unwrap(),
            r#"["manage_vendors","export_reports"]"#
        );
    }

    #[test]
    fn test_permission_parse_and_label() {
        assert_eq!(
            "view_analytics".parse::<Permission>().unwrap(),
            Permission::ViewAnalytics
        );
        assert!("unknown".parse::<Permission>().is_err());
        assert_eq!(Permission::ManagePayments.label(), "manage payments");
    }
}
