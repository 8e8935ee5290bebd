//! Authentication extractors for the admin dashboard.
//!
//! Each protected handler takes [`RequireAdmin`] or [`RequireSuperAdmin`].
//! Extraction runs the session guard once per request, so handlers get the
//! confirmed admin and token and never check the session themselves.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::models::{AuthenticatedAdmin, session_keys};
use crate::services::{GuardOutcome, TokenStore, TokenStoreError, check_session};
use crate::state::AppState;

/// Sign-in page every rejected request is sent to.
pub const SIGN_IN_PATH: &str = "/auth/signin";

impl TokenStore for Session {
    async fn load(&self) -> Result<Option<SecretString>, TokenStoreError> {
        self.get::<String>(session_keys::ADMIN_TOKEN)
            .await
            .map(|token| token.map(SecretString::from))
            .map_err(|e| TokenStoreError(e.to_string()))
    }

    async fn save(&self, token: SecretString) -> Result<(), TokenStoreError> {
        use secrecy::ExposeSecret;

        self.insert(session_keys::ADMIN_TOKEN, token.expose_secret())
            .await
            .map_err(|e| TokenStoreError(e.to_string()))
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        self.remove::<String>(session_keys::ADMIN_TOKEN)
            .await
            .map(|_| ())
            .map_err(|e| TokenStoreError(e.to_string()))
    }
}

/// Extractor that requires a valid admin session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", admin.admin.admin_name)
/// }
/// ```
pub struct RequireAdmin(pub AuthenticatedAdmin);

/// Error returned when a valid admin session is required.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// No valid token; go to sign-in.
    RedirectToSignIn,
    /// The session layer is missing from the router.
    MissingSession,
    /// Signed in, but not a super admin.
    Forbidden,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn => Redirect::to(SIGN_IN_PATH).into_response(),
            Self::MissingSession => {
                tracing::error!("Session layer not installed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Only super admins can manage admins",
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminAuthRejection::MissingSession)?;

        match check_session(&session, state.backend()).await {
            GuardOutcome::Authenticated(admin) => {
                set_sentry_user(admin.admin.id.as_str());
                Ok(Self(admin))
            }
            GuardOutcome::Redirect => Err(AdminAuthRejection::RedirectToSignIn),
        }
    }
}

/// Extractor that requires a super admin.
///
/// Redirects to sign-in without a valid session, answers 403 for admins
/// without the `super_admin` role.
pub struct RequireSuperAdmin(pub AuthenticatedAdmin);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAdmin(admin) = RequireAdmin::from_request_parts(parts, state).await?;

        if !admin.is_super_admin() {
            tracing::warn!(admin_id = %admin.admin.id, "Super admin required");
            return Err(AdminAuthRejection::Forbidden);
        }

        Ok(Self(admin))
    }
}

/// Store a freshly issued token in the session.
///
/// The session id is cycled so a pre-sign-in cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn sign_in(session: &Session, token: SecretString) -> Result<(), TokenStoreError> {
    session
        .cycle_id()
        .await
        .map_err(|e| TokenStoreError(e.to_string()))?;
    TokenStore::save(session, token).await
}

/// Forget the token (sign-out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn sign_out(session: &Session) -> Result<(), TokenStoreError> {
    TokenStore::clear(session).await
}
