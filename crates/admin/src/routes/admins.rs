//! Admin account management route handlers.
//!
//! Any signed-in admin can see the list; only super admins can create,
//! update or delete accounts. The temporary password of a new account is
//! kept in the session for exactly one page view instead of the URL.

use askama::Template;
use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State},
    response::{Redirect, Response},
    routing::{get, post},
};
use bitnbolt_core::{
    AdminId, AdminRole, AdminStats, Email, Permission, ValidationError, required,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::{AdminUpdate, NewAdmin};
use crate::{
    filters,
    middleware::{RequireAdmin, RequireSuperAdmin},
    state::AppState,
};

use super::{AdminUserView, FlashQuery, NavLink, nav_links, redirect_with, render};

const ADMINS_PATH: &str = "/admins";

/// Session key holding a just-created admin's temporary password.
const TEMPORARY_PASSWORD_KEY: &str = "createdAdminPassword";

// =============================================================================
// Form parsing
// =============================================================================

/// Create/edit admin form.
///
/// Parsed from the raw body because the permission checkboxes repeat the
/// `permissions` key. Tags the dashboard has no checkbox for come back in
/// hidden `retained_permissions` fields so an edit does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminForm {
    pub admin_name: String,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub retained_permissions: Vec<String>,
    pub is_active: bool,
}

impl AdminForm {
    /// Parse an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "admin_name" => form.admin_name = value.into_owned(),
                "email" => form.email = value.into_owned(),
                "role" => form.role = value.into_owned(),
                "permissions" => form.permissions.push(value.into_owned()),
                "retained_permissions" => form.retained_permissions.push(value.into_owned()),
                "isActive" => form.is_active = matches!(value.as_ref(), "on" | "true" | "1"),
                _ => {}
            }
        }
        form
    }

    fn fields(&self) -> Result<(String, Email, AdminRole, Vec<Permission>), ValidationError> {
        let admin_name = required("Name", &self.admin_name)?;
        let email = Email::parse(&self.email)?;
        let role = self
            .role
            .parse::<AdminRole>()
            .map_err(|_| ValidationError::InvalidRole(self.role.clone()))?;

        let mut permissions = Vec::with_capacity(self.permissions.len());
        for tag in &self.permissions {
            let permission = tag
                .parse::<Permission>()
                .map_err(|_| ValidationError::InvalidPermission(tag.clone()))?;
            if !permissions.contains(&permission) {
                permissions.push(permission);
            }
        }
        // Checkboxes decide known tags
        for tag in self.retained_permissions.iter().filter(|t| !t.trim().is_empty()) {
            let permission = Permission::from_tag(tag);
            if !permission.is_known() && !permissions.contains(&permission) {
                permissions.push(permission);
            }
        }

        Ok((admin_name, email, role, permissions))
    }

    /// Validate into a create request.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn into_new_admin(self) -> Result<NewAdmin, ValidationError> {
        let (admin_name, email, role, permissions) = self.fields()?;
        Ok(NewAdmin {
            admin_name,
            email: email.into_inner(),
            role,
            permissions,
        })
    }

    /// Validate into an update request for `admin_id`.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn into_update(self, admin_id: AdminId) -> Result<AdminUpdate, ValidationError> {
        let (admin_name, email, role, permissions) = self.fields()?;
        Ok(AdminUpdate {
            admin_id,
            admin_name,
            email: email.into_inner(),
            role,
            permissions,
            is_active: self.is_active,
        })
    }
}

// =============================================================================
// Views
// =============================================================================

/// Permission checkbox.
#[derive(Debug, Clone)]
pub struct PermissionOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

fn permission_options(selected: &[Permission]) -> Vec<PermissionOption> {
    Permission::ASSIGNABLE
        .into_iter()
        .map(|p| PermissionOption {
            value: p.as_str().to_string(),
            label: p.label(),
            checked: selected.contains(&p),
        })
        .collect()
}

/// Role option in a select.
#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn role_options(selected: AdminRole) -> Vec<RoleOption> {
    AdminRole::ALL
        .into_iter()
        .map(|r| RoleOption {
            value: r.as_str(),
            label: r.label(),
            selected: r == selected,
        })
        .collect()
}

/// Admin row for templates.
#[derive(Debug, Clone)]
pub struct AdminRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_label: &'static str,
    pub is_super_admin: bool,
    pub is_active: bool,
    pub is_self: bool,
    pub permissions: Vec<String>,
    pub last_login: String,
    pub role_options: Vec<RoleOption>,
    pub permission_options: Vec<PermissionOption>,
    /// Tags without a checkbox, sent back unchanged on save.
    pub retained_permissions: Vec<String>,
}

/// Admins page template.
#[derive(Template)]
#[template(path = "admins/index.html")]
pub struct AdminsIndexTemplate {
    pub admin_user: AdminUserView,
    pub nav: Vec<NavLink>,
    pub admins: Vec<AdminRow>,
    pub stats: AdminStats,
    pub can_manage: bool,
    pub new_role_options: Vec<RoleOption>,
    pub new_permission_options: Vec<PermissionOption>,
    pub temporary_password: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Build the admins router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(ADMINS_PATH, get(index).post(create))
        .route("/admins/{id}/update", post(update))
        .route("/admins/{id}/delete", post(delete))
}

/// GET /admins
#[instrument(skip_all)]
async fn index(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Query(flash): Query<FlashQuery>,
) -> Response {
    let (admins, stats, load_error) = match state.backend().list_admins(&auth.token).await {
        Ok(list) => (list.admins, list.stats, None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch admins");
            (
                Vec::new(),
                AdminStats::default(),
                Some(e.user_message_or("Failed to fetch admins")),
            )
        }
    };

    // Shown once
    let temporary_password = session
        .remove::<String>(TEMPORARY_PASSWORD_KEY)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read temporary password");
            None
        });

    let rows = admins
        .iter()
        .map(|a| AdminRow {
            id: a.id.to_string(),
            name: a.admin_name.clone(),
            email: a.email.to_string(),
            role_label: a.role.label(),
            is_super_admin: a.can_manage_admins(),
            is_active: a.is_active,
            is_self: a.id == auth.admin.id,
            permissions: a.permissions.iter().map(|p| p.label()).collect(),
            last_login: a
                .last_login
                .map_or_else(|| "Never".to_string(), |t| t.format("%d %b %Y").to_string()),
            role_options: role_options(a.role),
            permission_options: permission_options(&a.permissions),
            retained_permissions: a
                .permissions
                .iter()
                .filter(|p| !p.is_known())
                .map(ToString::to_string)
                .collect(),
        })
        .collect();

    render(&AdminsIndexTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        nav: nav_links(ADMINS_PATH),
        admins: rows,
        stats,
        can_manage: auth.is_super_admin(),
        new_role_options: role_options(AdminRole::Admin),
        new_permission_options: permission_options(&[]),
        temporary_password,
        success_message: flash.success,
        error_message: load_error.or(flash.error),
    })
}

/// POST /admins
#[instrument(skip_all)]
async fn create(
    RequireSuperAdmin(auth): RequireSuperAdmin,
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Redirect {
    let new_admin = match AdminForm::parse(&body).into_new_admin() {
        Ok(new_admin) => new_admin,
        Err(e) => return redirect_with(ADMINS_PATH, "error", &e.to_string()),
    };

    match state.backend().create_admin(&auth.token, &new_admin).await {
        Ok(created) => {
            tracing::info!(email = %new_admin.email, created_by = %auth.admin.id, "Admin created");
            if let Err(e) = session
                .insert(TEMPORARY_PASSWORD_KEY, created.temporary_password)
                .await
            {
                tracing::error!(error = %e, "Failed to keep temporary password for display");
            }
            redirect_with(ADMINS_PATH, "success", "Admin created successfully!")
        }
        Err(e) => redirect_with(
            ADMINS_PATH,
            "error",
            &e.user_message_or("Failed to create admin"),
        ),
    }
}

/// POST /admins/{id}/update
#[instrument(skip(auth, state, body))]
async fn update(
    RequireSuperAdmin(auth): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Redirect {
    let update = match AdminForm::parse(&body).into_update(AdminId::new(id)) {
        Ok(update) => update,
        Err(e) => return redirect_with(ADMINS_PATH, "error", &e.to_string()),
    };

    match state.backend().update_admin(&auth.token, &update).await {
        Ok(()) => redirect_with(ADMINS_PATH, "success", "Admin updated successfully!"),
        Err(e) => redirect_with(
            ADMINS_PATH,
            "error",
            &e.user_message_or("Failed to update admin"),
        ),
    }
}

/// POST /admins/{id}/delete
#[instrument(skip(auth, state))]
async fn delete(
    RequireSuperAdmin(auth): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    let admin_id = AdminId::new(id);
    if admin_id == auth.admin.id {
        return redirect_with(ADMINS_PATH, "error", "You cannot delete your own account");
    }

    match state.backend().delete_admin(&auth.token, &admin_id).await {
        Ok(()) => redirect_with(ADMINS_PATH, "success", "Admin deleted successfully!"),
        Err(e) => redirect_with(
            ADMINS_PATH,
            "error",
            &e.user_message_or("Failed to delete admin"),
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_permissions() {
        let form = AdminForm::parse(
            b"admin_name=Anita+Rao&email=anita%40bitnbolt.in&role=admin\
              &permissions=manage_vendors&permissions=view_analytics&isActive=on",
        );
        assert_eq!(form.admin_name, "Anita Rao");
        assert_eq!(form.email, "anita@bitnbolt.in");
        assert_eq!(form.permissions, vec!["manage_vendors", "view_analytics"]);
        assert!(form.is_active);

        let new_admin = form.into_new_admin().unwrap();
        assert_eq!(
            new_admin.permissions,
            vec![Permission::ManageVendors, Permission::ViewAnalytics]
        );
        assert_eq!(new_admin.role, AdminRole::Admin);
    }

    #[test]
    fn test_unchecked_active_box_means_inactive() {
        let form = AdminForm::parse(b"admin_name=A&email=a%40b.in&role=super_admin");
        let update = form.into_update(AdminId::new("a1")).unwrap();
        assert!(!update.is_active);
        assert_eq!(update.role, AdminRole::SuperAdmin);
        assert!(update.permissions.is_empty());
    }

    #[test]
    fn test_invalid_fields_rejected() {
        let form = AdminForm::parse(b"admin_name=+&email=a%40b.in&role=admin");
        assert_eq!(
            form.into_new_admin().unwrap_err(),
            ValidationError::Required("Name")
        );

        let form = AdminForm::parse(b"admin_name=A&email=nope&role=admin");
        assert!(matches!(
            form.into_new_admin().unwrap_err(),
            ValidationError::InvalidEmail(_)
        ));

        let form = AdminForm::parse(b"admin_name=A&email=a%40b.in&role=owner");
        assert_eq!(
            form.into_new_admin().unwrap_err(),
            ValidationError::InvalidRole("owner".to_string())
        );

        let form =
            AdminForm::parse(b"admin_name=A&email=a%40b.in&role=admin&permissions=launch_rockets");
        assert_eq!(
            form.into_new_admin().unwrap_err(),
            ValidationError::InvalidPermission("launch_rockets".to_string())
        );
    }

    #[test]
    fn test_retained_permissions_survive_an_edit() {
        let form = AdminForm::parse(
            b"admin_name=A&email=a%40b.in&role=admin&permissions=manage_orders\
              &retained_permissions=export_reports&retained_permissions=manage_admins",
        );
        let update = form.into_update(AdminId::new("a2")).unwrap();
        assert_eq!(
            update.permissions,
            vec![
                Permission::ManageOrders,
                Permission::Unknown("export_reports".to_string())
            ]
        );
    }

    #[test]
    fn test_permission_options_mark_selection() {
        let options = permission_options(&[Permission::ManageOrders]);
        assert_eq!(options.len(), 8);
        assert_eq!(options.iter().filter(|o| o.checked).count(), 1);
        assert!(options.iter().any(|o| o.value == "manage_orders" && o.checked));
    }
}
