//! Session guard.
//!
//! Every protected page starts the same way: read the stored token, ask the
//! backend who it belongs to, and either continue with that admin or send the
//! browser to sign-in. The check lives here once; the dashboard runs it from
//! its extractors and the CLI runs it before each command.
//!
//! While the backend call is in flight the guard is simply a pending future.
//! Its outcome is terminal: a failed check never retries.

use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::backend::BackendClient;
use crate::models::AuthenticatedAdmin;

/// Failure to read or write the persisted token.
#[derive(Debug, Error)]
#[error("Token store error: {0}")]
pub struct TokenStoreError(pub String);

/// Where the bearer token lives between requests.
///
/// The dashboard keeps it in the server-side session, the CLI in a file.
pub trait TokenStore: Send + Sync {
    /// The stored token, if any.
    fn load(&self) -> impl Future<Output = Result<Option<SecretString>, TokenStoreError>> + Send;

    /// Replace the stored token.
    fn save(&self, token: SecretString) -> impl Future<Output = Result<(), TokenStoreError>> + Send;

    /// Forget the stored token.
    fn clear(&self) -> impl Future<Output = Result<(), TokenStoreError>> + Send;
}

/// Outcome of a session check.
#[derive(Debug, Clone)]
pub enum GuardOutcome {
    /// The token is valid; the admin it belongs to.
    Authenticated(AuthenticatedAdmin),
    /// No valid token. Send the user to sign-in.
    Redirect,
}

impl GuardOutcome {
    #[must_use]
    pub fn into_admin(self) -> Option<AuthenticatedAdmin> {
        match self {
            Self::Authenticated(admin) => Some(admin),
            Self::Redirect => None,
        }
    }
}

/// Check the stored token against `GET /api/admin/session`.
///
/// With no token stored nothing is sent. Any failure of the session call
/// (rejected token, unreachable backend, unreadable answer) clears the token.
#[tracing::instrument(skip_all)]
pub async fn check_session<S: TokenStore>(store: &S, backend: &BackendClient) -> GuardOutcome {
    let token = match store.load().await {
        Ok(Some(token)) if !token.expose_secret().trim().is_empty() => token,
        Ok(_) => {
            tracing::debug!("No admin token stored");
            return GuardOutcome::Redirect;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not read admin token");
            return GuardOutcome::Redirect;
        }
    };

    match backend.session(&token).await {
        Ok(admin) => {
            tracing::debug!(admin_id = %admin.id, "Session valid");
            GuardOutcome::Authenticated(AuthenticatedAdmin { admin, token })
        }
        Err(e) => {
            tracing::info!(error = %e, "Session check failed, clearing token");
            if let Err(e) = store.clear().await {
                tracing::warn!(error = %e, "Could not clear admin token");
            }
            GuardOutcome::Redirect
        }
    }
}

/// In-memory token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecretString>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(SecretString::from(token.into()))),
        }
    }

    /// Whether a token is currently stored.
    pub async fn has_token(&self) -> bool {
        self.token.lock().await.is_some()
    }
}

impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<SecretString>, TokenStoreError> {
        Ok(self.token.lock().await.clone())
    }

    async fn save(&self, token: SecretString) -> Result<(), TokenStoreError> {
        *self.token.lock().await = Some(token);
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.lock().await = None;
        Ok(())
    }
}
