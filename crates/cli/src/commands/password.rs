//! Password recovery: request the reset email, then set a new password
//! with the token it contains.

use bitnbolt_core::{Email, PasswordReset, ValidationError};

use super::{CliError, Context};

/// Ask the backend to email a reset link.
///
/// # Errors
///
/// Returns an error if the email is malformed or the backend refuses.
pub async fn forgot(ctx: &Context, email: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(ValidationError::from)?;
    ctx.backend.send_password_reset_email(email.as_str()).await?;
    tracing::info!("Password reset email sent successfully! Please check your inbox.");
    Ok(())
}

/// Set a new password using the emailed token.
///
/// # Errors
///
/// Returns a validation error before any request when the token is blank,
/// the passwords differ or the password is too short.
pub async fn reset(ctx: &Context, reset: PasswordReset) -> Result<(), CliError> {
    reset.validate()?;
    ctx.backend
        .reset_password(reset.token.trim(), &reset.password)
        .await?;
    tracing::info!("Password reset successfully! Please sign in.");
    Ok(())
}
