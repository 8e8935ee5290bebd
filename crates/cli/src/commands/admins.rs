//! `admins list|create|delete`. Changes require a super admin.

use bitnbolt_admin::backend::NewAdmin;
use bitnbolt_admin::routes::admins::AdminForm;
use bitnbolt_core::{AdminId, ValidationError};

use super::{CliError, Context};

/// Print every admin account.
///
/// # Errors
///
/// Returns an error if not signed in or the backend refuses the listing.
pub async fn list(ctx: &Context) -> Result<(), CliError> {
    let auth = ctx.require_admin().await?;
    let list = ctx.backend.list_admins(&auth.token).await?;

    tracing::info!(
        "Admins: {} total, {} active, {} super admins",
        list.stats.total,
        list.stats.active,
        list.stats.super_admins
    );
    for admin in &list.admins {
        tracing::info!(
            "{}  {} <{}>  {}{}",
            admin.id,
            admin.admin_name,
            admin.email,
            admin.role.label(),
            if admin.is_active { "" } else { "  (inactive)" }
        );
    }
    Ok(())
}

/// Validate the create arguments with the same rules as the dashboard form.
///
/// # Errors
///
/// Returns the first invalid argument.
pub fn new_admin(
    name: &str,
    email: &str,
    role: &str,
    permissions: &[String],
) -> Result<NewAdmin, ValidationError> {
    AdminForm {
        admin_name: name.to_owned(),
        email: email.to_owned(),
        role: role.to_owned(),
        permissions: permissions.to_vec(),
        retained_permissions: Vec::new(),
        is_active: true,
    }
    .into_new_admin()
}

/// Create an admin and show its one-time temporary password.
///
/// # Errors
///
/// Returns an error for invalid arguments, a non-super-admin caller, or a
/// backend refusal.
pub async fn create(ctx: &Context, new_admin: NewAdmin) -> Result<(), CliError> {
    let auth = ctx.require_super_admin().await?;
    let created = ctx.backend.create_admin(&auth.token, &new_admin).await?;

    tracing::info!("Admin created successfully!");
    tracing::info!("  Email: {}", new_admin.email);
    tracing::info!("  Role: {}", new_admin.role.label());
    tracing::info!("  Temporary password: {}", created.temporary_password);
    tracing::info!("Share it securely; it will not be shown again.");
    Ok(())
}

/// Delete an admin account. Deleting yourself is refused locally.
///
/// # Errors
///
/// Returns an error for a non-super-admin caller, self-deletion, or a backend
/// refusal.
pub async fn delete(ctx: &Context, admin_id: String) -> Result<(), CliError> {
    let auth = ctx.require_super_admin().await?;
    let admin_id = AdminId::new(admin_id);
    if admin_id == auth.admin.id {
        return Err(CliError::SelfDelete);
    }

    ctx.backend.delete_admin(&auth.token, &admin_id).await?;
    tracing::info!("Admin deleted successfully!");
    Ok(())
}
