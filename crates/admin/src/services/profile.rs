//! Profile submission.
//!
//! An attached image is uploaded first and must succeed before the name
//! change is sent. If the upload fails the second request is never made.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bitnbolt_core::{ValidationError, required};
use secrecy::SecretString;
use thiserror::Error;

use crate::backend::{BackendClient, BackendError};

/// An uploaded image file.
#[derive(Clone)]
pub struct ProfileImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ProfileImage {
    /// Wrap an upload. An empty file part means no image was chosen.
    #[must_use]
    pub fn from_upload(content_type: Option<&str>, bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Some(Self {
            content_type: content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or("application/octet-stream")
                .to_string(),
            bytes,
        })
    }

    /// The image as a base64 `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

impl std::fmt::Debug for ProfileImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileImage")
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Edit-profile form contents.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub admin_name: String,
    pub image: Option<ProfileImage>,
}

/// Which step of the profile submission failed.
#[derive(Debug, Error)]
pub enum ProfileUpdateError {
    #[error("Invalid profile: {0}")]
    Validation(#[from] ValidationError),

    #[error("Profile image upload failed: {0}")]
    ImageUpload(#[source] BackendError),

    #[error("Profile update failed: {0}")]
    Details(#[source] BackendError),
}

impl ProfileUpdateError {
    /// Message shown on the profile page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::ImageUpload(e) => e.user_message_or("Failed to upload image"),
            Self::Details(e) => e.user_message_or("Failed to update profile"),
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdated {
    /// New image URL when an image was uploaded and the backend echoed it.
    pub image_url: Option<String>,
}

/// Upload the image (if any), then update the display name.
///
/// # Errors
///
/// - `ProfileUpdateError::Validation` for a blank name, before any request
/// - `ProfileUpdateError::ImageUpload` if the upload fails (no second request)
/// - `ProfileUpdateError::Details` if the name update fails
#[tracing::instrument(skip_all, fields(with_image = update.image.is_some()))]
pub async fn submit_profile_update(
    backend: &BackendClient,
    token: &SecretString,
    update: &ProfileUpdate,
) -> Result<ProfileUpdated, ProfileUpdateError> {
    let admin_name = required("Name", &update.admin_name)?;

    let image_url = match &update.image {
        Some(image) => backend
            .upload_profile_image(token, &image.to_data_url())
            .await
            .map_err(ProfileUpdateError::ImageUpload)?,
        None => None,
    };

    backend
        .update_profile_name(token, &admin_name)
        .await
        .map_err(ProfileUpdateError::Details)?;

    Ok(ProfileUpdated { image_url })
}
