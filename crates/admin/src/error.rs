//! Unified error handling for the admin dashboard.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bitnbolt_core::ValidationError;
use thiserror::Error;

use crate::backend::BackendError;

/// Application-level error type for the admin dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend request failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Input rejected before reaching the backend.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Backend(e) if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
            Self::Backend(BackendError::Rejected { status, .. }) if *status == 404 => {
                StatusCode::NOT_FOUND
            }
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Only failures on our side or the backend's reach Sentry
        if matches!(
            self,
            Self::Internal(_) | Self::Backend(BackendError::Http(_) | BackendError::Parse(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Backend(e) => e.user_message(),
            Self::Validation(e) => e.to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Sentry user for an admin: the id only, since events are sent without PII.
fn sentry_user(admin_id: &str) -> sentry::User {
    sentry::User {
        id: Some(admin_id.to_string()),
        ..Default::default()
    }
}

/// Set the Sentry user context for the signed-in admin.
pub fn set_sentry_user(admin_id: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry_user(admin_id)));
    });
}
