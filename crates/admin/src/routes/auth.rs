//! Authentication route handlers.
//!
//! Sign-in exchanges credentials for a backend token kept in the session.
//! Password recovery is a two-step email flow handled by the backend.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use bitnbolt_core::{Email, PasswordReset, ValidationError};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::{sign_in, sign_out};
use crate::state::AppState;

use super::{redirect_with, render};

const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";

/// Sign-in page template.
#[derive(Template)]
#[template(path = "auth/signin.html")]
struct SignInTemplate {
    success_message: Option<String>,
    error_message: Option<String>,
}

/// Forgot/reset password page template.
#[derive(Template)]
#[template(path = "auth/forgot_password.html")]
struct ForgotPasswordTemplate {
    /// Present when the admin followed the emailed link.
    reset_token: Option<String>,
    success_message: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthPageQuery {
    token: Option<String>,
    success: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SignInForm {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct ForgotPasswordForm {
    email: String,
}

#[derive(Deserialize)]
struct ResetPasswordForm {
    token: String,
    password: String,
    confirm_password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signin", get(signin_page).post(signin))
        .route("/auth/signout", post(signout))
        .route(
            FORGOT_PASSWORD_PATH,
            get(forgot_password_page).post(send_reset_email),
        )
        .route("/auth/reset-password", post(reset_password))
}

/// GET /auth/signin
async fn signin_page(Query(query): Query<AuthPageQuery>) -> Response {
    render(&SignInTemplate {
        success_message: query.success,
        error_message: query.error,
    })
}

/// POST /auth/signin
#[instrument(skip_all)]
async fn signin(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> Response {
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            return redirect_with("/auth/signin", "error", &ValidationError::from(e).to_string())
                .into_response();
        }
    };
    if form.password.is_empty() {
        return redirect_with("/auth/signin", "error", "Password is required").into_response();
    }

    let login = match state.backend().login(email.as_str(), &form.password).await {
        Ok(login) => login,
        Err(e) => {
            tracing::info!(error = %e, "Sign-in refused");
            return redirect_with("/auth/signin", "error", &e.user_message_or("Invalid credentials"))
                .into_response();
        }
    };

    if let Err(e) = sign_in(&session, SecretString::from(login.token)).await {
        tracing::error!(error = %e, "Failed to store admin token");
        return redirect_with("/auth/signin", "error", crate::backend::GENERIC_ERROR_MESSAGE)
            .into_response();
    }

    tracing::info!(email = %email, "Admin signed in");
    Redirect::to("/").into_response()
}

/// POST /auth/signout
async fn signout(session: Session) -> impl IntoResponse {
    if let Err(e) = sign_out(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin token");
    }
    Redirect::to("/auth/signin")
}

/// GET /auth/forgot-password
async fn forgot_password_page(Query(query): Query<AuthPageQuery>) -> Response {
    render(&ForgotPasswordTemplate {
        reset_token: query.token.filter(|t| !t.trim().is_empty()),
        success_message: query.success,
        error_message: query.error,
    })
}

/// POST /auth/forgot-password
#[instrument(skip_all)]
async fn send_reset_email(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Redirect {
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            return redirect_with(
                FORGOT_PASSWORD_PATH,
                "error",
                &ValidationError::from(e).to_string(),
            );
        }
    };

    match state.backend().send_password_reset_email(email.as_str()).await {
        Ok(()) => redirect_with(
            FORGOT_PASSWORD_PATH,
            "success",
            "Password reset email sent successfully! Please check your inbox.",
        ),
        Err(e) => redirect_with(
            FORGOT_PASSWORD_PATH,
            "error",
            &e.user_message_or("Failed to send reset email"),
        ),
    }
}

/// POST /auth/reset-password
#[instrument(skip_all)]
async fn reset_password(
    State(state): State<AppState>,
    Form(form): Form<ResetPasswordForm>,
) -> Redirect {
    let reset = PasswordReset {
        token: form.token,
        password: form.password,
        confirm_password: form.confirm_password,
    };
    let retry_path = format!(
        "{FORGOT_PASSWORD_PATH}?token={}",
        urlencoding::encode(reset.token.trim())
    );

    if let Err(e) = reset.validate() {
        return redirect_with(&retry_path, "error", &e.to_string());
    }

    match state
        .backend()
        .reset_password(reset.token.trim(), &reset.password)
        .await
    {
        Ok(()) => redirect_with(
            "/auth/signin",
            "success",
            "Password reset successfully! Please sign in.",
        ),
        Err(e) => redirect_with(
            &retry_path,
            "error",
            &e.user_message_or("Failed to reset password"),
        ),
    }
}
