//! Own-profile endpoints.

use reqwest::Method;
use secrecy::SecretString;
use serde::de::IgnoredAny;
use tracing::instrument;

use super::{BackendClient, BackendError, ProfileBody, ProfileImageBody};

impl BackendClient {
    /// Change the signed-in admin's display name.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn update_profile_name(
        &self,
        token: &SecretString,
        admin_name: &str,
    ) -> Result<(), BackendError> {
        let body = ProfileBody {
            admin_name: Some(admin_name),
            ..ProfileBody::default()
        };
        self.put_profile(token, &body).await
    }

    /// Change the signed-in admin's password.
    ///
    /// # Errors
    ///
    /// Returns error if the current password is wrong or the request fails.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        token: &SecretString,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), BackendError> {
        let body = ProfileBody {
            current_password: Some(current_password),
            new_password: Some(new_password),
            ..ProfileBody::default()
        };
        self.put_profile(token, &body).await
    }

    /// Upload a profile image given as a base64 `data:` URL.
    ///
    /// Returns the stored image URL when the backend echoes one.
    ///
    /// # Errors
    ///
    /// Returns error if the backend refuses the image or the request fails.
    #[instrument(skip_all, fields(bytes = image_data.len()))]
    pub async fn upload_profile_image(
        &self,
        token: &SecretString,
        image_data: &str,
    ) -> Result<Option<String>, BackendError> {
        let url = self.endpoint("/api/admin/profile/image")?;
        let request = self
            .request(Method::POST, url, Some(token))
            .json(&ProfileImageBody { image_data });
        let envelope = self.execute::<serde_json::Value>(request).await?;
        Ok(envelope.data.as_ref().and_then(image_url))
    }

    async fn put_profile(
        &self,
        token: &SecretString,
        body: &ProfileBody<'_>,
    ) -> Result<(), BackendError> {
        let url = self.endpoint("/api/admin/profile")?;
        let request = self.request(Method::PUT, url, Some(token)).json(body);
        self.execute::<IgnoredAny>(request).await?;
        Ok(())
    }
}

fn image_url(data: &serde_json::Value) -> Option<String> {
    ["profileImage", "imageUrl"]
        .iter()
        .find_map(|key| data.get(key).and_then(serde_json::Value::as_str))
        .map(str::to_owned)
}
