//! Client-side validation performed before any backend request.
//!
//! Every check here blocks submission: when one fails nothing is sent.

use thiserror::Error;

use super::EmailError;

/// Minimum password length accepted by the dashboard.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validation failures, with the exact message shown to the admin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Suspending a vendor without a non-blank reason.
    #[error("Suspension reason is required")]
    EmptySuspensionReason,

    /// Password change form submitted with a blank field.
    #[error("All fields are required")]
    MissingPasswordFields,

    /// New password and confirmation differ (password change).
    #[error("New passwords do not match")]
    NewPasswordMismatch,

    /// New password below [`MIN_PASSWORD_LENGTH`] (password change).
    #[error("New password must be at least 6 characters long")]
    NewPasswordTooShort,

    /// Password and confirmation differ (password reset).
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password below [`MIN_PASSWORD_LENGTH`] (password reset).
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    /// Reset attempted without the emailed token.
    #[error("Reset token is missing")]
    MissingResetToken,

    /// A required text field was blank.
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid permission: {0}")]
    InvalidPermission(String),

    #[error("Unknown vendor action: {0}")]
    UnknownVendorAction(String),
}

/// Length in UTF-16 code units, the unit the backend and browser forms count.
fn too_short(password: &str) -> bool {
    password.encode_utf16().count() < MIN_PASSWORD_LENGTH
}

/// Password change submitted from the profile page.
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    /// Check the form in the order the admin sees errors: blanks, mismatch, length.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingPasswordFields);
        }
        if self.new_password != self.confirm_password {
            return Err(ValidationError::NewPasswordMismatch);
        }
        if too_short(&self.new_password) {
            return Err(ValidationError::NewPasswordTooShort);
        }
        Ok(())
    }
}

/// Password reset submitted with the token from the reset email.
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

impl PasswordReset {
    /// # Errors
    ///
    /// Returns the first failing rule: token, mismatch, length.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.trim().is_empty() {
            return Err(ValidationError::MissingResetToken);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if too_short(&self.password) {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }
}

/// Trim `value` and reject it when blank.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] naming `field`.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_owned())
}
