//! REST client for the marketplace backend.
//!
//! Every endpoint answers with a JSON envelope `{success, message?, data?}`.
//! A non-2xx status, or a 2xx with `success: false`, is a failure carrying
//! the backend's `message`.
//!
//! # Authentication
//!
//! All calls except login and the forgot/reset password flow send
//! `Authorization: Bearer <token>`.

mod admins;
mod auth;
mod profile;
mod types;
mod vendors;

pub use types::*;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::BackendConfig;

/// Message shown when the backend could not be reached or answered garbage.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport failure (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token missing, expired or lacking rights (401/403).
    #[error("Unauthorized ({status})")]
    Unauthorized { status: u16, message: Option<String> },

    /// The backend refused the request.
    #[error("Backend rejected request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// Response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl BackendError {
    /// Text shown to the admin: the backend's own message when it sent one,
    /// `fallback` when it refused without one, and the generic message for
    /// transport or decoding failures.
    #[must_use]
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            Self::Unauthorized { message, .. } | Self::Rejected { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback)
                .to_string(),
            Self::Http(_) | Self::Parse(_) | Self::Url(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// [`Self::user_message_or`] with the generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_ERROR_MESSAGE)
    }

    /// HTTP status the backend answered with, if it answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) | Self::Url(_) => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Marketplace backend client.
///
/// Cheap to clone; the connection pool is shared.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bitnbolt-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Base URL every endpoint path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Absolute URL for an endpoint path such as `/api/admin/list`.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(join_endpoint(&self.inner.base_url, path)?)
    }

    /// Start a request, attaching the bearer token when given.
    pub(crate) fn request(
        &self,
        method: Method,
        url: Url,
        token: Option<&SecretString>,
    ) -> RequestBuilder {
        let builder = self.inner.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a request and decode the envelope.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let result = decode_envelope(status, &body);
        if let Err(e) = &result {
            tracing::warn!(status = status.as_u16(), error = %e, "Backend request failed");
        }
        result
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Append an endpoint path to the base URL, keeping any base path prefix.
fn join_endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let base = base.as_str().trim_end_matches('/');
    Url::parse(&format!("{base}{path}"))
}

/// Error bodies are read leniently; anything unreadable has no message.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Interpret a backend response.
///
/// # Errors
///
/// - [`BackendError::Unauthorized`] for 401/403
/// - [`BackendError::Rejected`] for any other non-2xx, or `success: false`
/// - [`BackendError::Parse`] when a 2xx body is not a valid envelope
pub fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<ApiEnvelope<T>, BackendError> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        let status = status.as_u16();
        return Err(if matches!(status, 401 | 403) {
            BackendError::Unauthorized { status, message }
        } else {
            BackendError::Rejected { status, message }
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiEnvelope::empty());
    }

    let envelope: ApiEnvelope<T> = serde_json::from_slice(body)
        .map_err(|e| BackendError::Parse(format!("Failed to parse response: {e}")))?;

    if !envelope.success {
        return Err(BackendError::Rejected {
            status: status.as_u16(),
            message: envelope.message,
        });
    }

    Ok(envelope)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Token {
        token: String,
    }

    #[test]
    fn test_decode_success_with_data() {
        let body = br#"{"success":true,"data":{"token":"abc"}}"#;
        let envelope: ApiEnvelope<Token> = decode_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(envelope.into_data().unwrap().token, "abc");
    }

    #[test]
    fn test_decode_success_false_is_rejection() {
        let body = br#"{"success":false,"message":"Vendor not found"}"#;
        let err = decode_envelope::<Token>(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, BackendError::Rejected { status: 200, .. }));
        assert_eq!(err.user_message(), "Vendor not found");
    }

    #[test]
    fn test_decode_unauthorized() {
        let body = br#"{"success":false,"message":"Token expired"}"#;
        let err = decode_envelope::<Token>(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));

        let err = decode_envelope::<Token>(StatusCode::FORBIDDEN, b"").unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_decode_error_without_json_body() {
        let err =
            decode_envelope::<Token>(StatusCode::BAD_GATEWAY, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, BackendError::Rejected { status: 502, message: None }));
        assert_eq!(
            err.user_message_or("Failed to create admin"),
            "Failed to create admin"
        );
    }

    #[test]
    fn test_decode_garbage_success_body() {
        let err = decode_envelope::<Token>(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_decode_empty_success_body() {
        let envelope = decode_envelope::<Token>(StatusCode::NO_CONTENT, b"").unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.into_data().is_err());
    }

    #[test]
    fn test_endpoint_joins_base_path() {
        let base = Url::parse("http://localhost:5000/backend/").unwrap();
        assert_eq!(
            join_endpoint(&base, "/api/admin/session").unwrap().as_str(),
            "http://localhost:5000/backend/api/admin/session"
        );

        let base = Url::parse("http://localhost:5000").unwrap();
        assert_eq!(
            join_endpoint(&base, "/api/admin/list").unwrap().as_str(),
            "http://localhost:5000/api/admin/list"
        );
    }
}
