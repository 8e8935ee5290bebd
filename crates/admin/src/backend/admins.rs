//! Admin account management endpoints.

use bitnbolt_core::AdminId;
use reqwest::Method;
use secrecy::SecretString;
use serde::de::IgnoredAny;
use tracing::instrument;

use super::{AdminList, AdminUpdate, BackendClient, BackendError, CreatedAdmin, NewAdmin};

impl BackendClient {
    /// All admin accounts with their counters.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip_all)]
    pub async fn list_admins(&self, token: &SecretString) -> Result<AdminList, BackendError> {
        let url = self.endpoint("/api/admin/list")?;
        self.execute(self.request(Method::GET, url, Some(token)))
            .await?
            .into_data()
    }

    /// Create an admin. The backend generates a temporary password.
    ///
    /// # Errors
    ///
    /// Returns error if the backend refuses (duplicate email, not a super
    /// admin) or the request fails.
    #[instrument(skip(self, token), fields(email = %admin.email, role = %admin.role))]
    pub async fn create_admin(
        &self,
        token: &SecretString,
        admin: &NewAdmin,
    ) -> Result<CreatedAdmin, BackendError> {
        let url = self.endpoint("/api/admin/create")?;
        let request = self.request(Method::POST, url, Some(token)).json(admin);
        self.execute(request).await?.into_data()
    }

    /// Replace an admin's name, email, role, permissions and active flag.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token, update), fields(admin_id = %update.admin_id))]
    pub async fn update_admin(
        &self,
        token: &SecretString,
        update: &AdminUpdate,
    ) -> Result<(), BackendError> {
        let url = self.endpoint("/api/admin/update")?;
        let request = self.request(Method::PUT, url, Some(token)).json(update);
        self.execute::<IgnoredAny>(request).await?;
        Ok(())
    }

    /// Delete an admin account.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token), fields(admin_id = %admin_id))]
    pub async fn delete_admin(
        &self,
        token: &SecretString,
        admin_id: &AdminId,
    ) -> Result<(), BackendError> {
        let mut url = self.endpoint("/api/admin/delete")?;
        url.query_pairs_mut().append_pair("adminId", admin_id.as_str());
        self.execute::<IgnoredAny>(self.request(Method::DELETE, url, Some(token)))
            .await?;
        Ok(())
    }
}
