//! Session, sign-in and password recovery endpoints.

use bitnbolt_core::Admin;
use reqwest::Method;
use secrecy::SecretString;
use serde::de::IgnoredAny;
use tracing::instrument;

use super::{
    BackendClient, BackendError, ForgotPasswordRequest, LoginData, LoginRequest,
    ResetPasswordRequest, SessionData,
};

impl BackendClient {
    /// Resolve a token to the admin it belongs to.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unauthorized` for an expired or unknown token.
    #[instrument(skip_all)]
    pub async fn session(&self, token: &SecretString) -> Result<Admin, BackendError> {
        let url = self.endpoint("/api/admin/session")?;
        let data: SessionData = self
            .execute(self.request(Method::GET, url, Some(token)))
            .await?
            .into_data()?;
        Ok(data.admin)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns error if the credentials are refused or the request fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, BackendError> {
        let url = self.endpoint("/api/admin/login")?;
        let request = self
            .request(Method::POST, url, None)
            .json(&LoginRequest { email, password });
        self.execute(request).await?.into_data()
    }

    /// Ask the backend to email a password reset link.
    ///
    /// # Errors
    ///
    /// Returns error if the backend refuses or the request fails.
    #[instrument(skip(self))]
    pub async fn send_password_reset_email(&self, email: &str) -> Result<(), BackendError> {
        let url = self.endpoint("/api/admin/forgot-password/send-email")?;
        let request = self
            .request(Method::POST, url, None)
            .json(&ForgotPasswordRequest { email });
        self.execute::<IgnoredAny>(request).await?;
        Ok(())
    }

    /// Set a new password using the emailed reset token.
    ///
    /// # Errors
    ///
    /// Returns error if the token is rejected or the request fails.
    #[instrument(skip_all)]
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), BackendError> {
        let url = self.endpoint("/api/admin/forgot-password/reset")?;
        let request = self
            .request(Method::POST, url, None)
            .json(&ResetPasswordRequest { token, password });
        self.execute::<IgnoredAny>(request).await?;
        Ok(())
    }
}
