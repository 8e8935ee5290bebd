//! Command implementations.
//!
//! Every command except `login` and the password recovery flow first runs
//! the session guard against the stored token, exactly like a dashboard page.

pub mod admins;
pub mod auth;
pub mod password;
pub mod vendors;

use std::path::PathBuf;

use bitnbolt_admin::backend::{BackendClient, BackendError};
use bitnbolt_admin::config::{BackendConfig, ConfigError};
use bitnbolt_admin::models::AuthenticatedAdmin;
use bitnbolt_admin::services::{TokenStoreError, check_session};
use bitnbolt_core::ValidationError;
use thiserror::Error;

use crate::token_store::FileTokenStore;

/// Errors reported to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{}", .0.user_message())]
    Backend(#[from] BackendError),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    #[error("Not signed in. Run `bnb login` first.")]
    NotSignedIn,

    #[error("Only super admins can manage admins")]
    Forbidden,

    #[error("You cannot delete your own account")]
    SelfDelete,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Backend client plus the token file, shared by every command.
#[derive(Debug)]
pub struct Context {
    pub backend: BackendClient,
    pub store: FileTokenStore,
}

impl Context {
    /// # Errors
    ///
    /// Returns an error if the backend URL is missing or invalid, or the HTTP
    /// client cannot be built.
    pub fn new(backend_url: Option<&str>, token_file: PathBuf) -> Result<Self, CliError> {
        let config = match backend_url {
            Some(url) => BackendConfig::new(url)?,
            None => BackendConfig::from_env()?,
        };
        Ok(Self {
            backend: BackendClient::new(&config)?,
            store: FileTokenStore::new(token_file),
        })
    }

    /// Run the session guard. A rejected token is removed from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NotSignedIn`] when there is no valid token.
    pub async fn require_admin(&self) -> Result<AuthenticatedAdmin, CliError> {
        check_session(&self.store, &self.backend)
            .await
            .into_admin()
            .ok_or(CliError::NotSignedIn)
    }

    /// Like [`Self::require_admin`], but only for super admins.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Forbidden`] for plain admins.
    pub async fn require_super_admin(&self) -> Result<AuthenticatedAdmin, CliError> {
        let auth = self.require_admin().await?;
        if !auth.is_super_admin() {
            return Err(CliError::Forbidden);
        }
        Ok(auth)
    }
}
