//! `login`, `logout` and `whoami`.

use bitnbolt_admin::services::TokenStore;
use bitnbolt_core::Email;
use secrecy::SecretString;

use super::{CliError, Context};

/// Exchange credentials for a token and store it.
///
/// # Errors
///
/// Returns an error if the email is malformed, the backend refuses the
/// credentials, or the token file cannot be written.
pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(bitnbolt_core::ValidationError::from)?;
    let password = bitnbolt_core::required("Password", password)?;

    let login = ctx.backend.login(email.as_str(), &password).await?;
    ctx.store.save(SecretString::from(login.token)).await?;

    match login.admin {
        Some(admin) => tracing::info!(
            "Signed in as {} <{}> ({})",
            admin.admin_name,
            admin.email,
            admin.role.label()
        ),
        None => tracing::info!("Signed in as {email}"),
    }
    tracing::info!("Token stored in {}", ctx.store.path().display());
    Ok(())
}

/// Forget the stored token.
///
/// # Errors
///
/// Returns an error if the token file exists but cannot be removed.
pub async fn logout(ctx: &Context) -> Result<(), CliError> {
    ctx.store.clear().await?;
    tracing::info!("Signed out");
    Ok(())
}

/// Show who the stored token belongs to.
///
/// # Errors
///
/// Returns [`CliError::NotSignedIn`] when there is no valid token.
pub async fn whoami(ctx: &Context) -> Result<(), CliError> {
    let auth = ctx.require_admin().await?;
    let admin = &auth.admin;

    tracing::info!("{} <{}>", admin.admin_name, admin.email);
    tracing::info!("  Role: {}", admin.role.label());
    tracing::info!("  Active: {}", if admin.is_active { "yes" } else { "no" });
    if !admin.permissions.is_empty() {
        let labels: Vec<String> = admin.permissions.iter().map(|p| p.label()).collect();
        tracing::info!("  Permissions: {}", labels.join(", "));
    }
    if let Some(last_login) = admin.last_login {
        tracing::info!("  Last login: {}", last_login.format("%d %b %Y, %H:%M UTC"));
    }
    Ok(())
}
