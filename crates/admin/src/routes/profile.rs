//! Own-profile route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    response::{Redirect, Response},
    routing::{get, post},
};
use bitnbolt_core::PasswordChange;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::AppError,
    filters,
    middleware::RequireAdmin,
    services::{ProfileImage, ProfileUpdate, submit_profile_update},
    state::AppState,
};

use super::{AdminUserView, FlashQuery, NavLink, nav_links, redirect_with, render};

const PROFILE_PATH: &str = "/profile";

/// Largest accepted multipart body (image plus name).
const MAX_PROFILE_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Profile page template.
#[derive(Template)]
#[template(path = "profile/index.html")]
pub struct ProfileTemplate {
    pub admin_user: AdminUserView,
    pub nav: Vec<NavLink>,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub last_login: Option<String>,
    pub member_since: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Build the profile router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            PROFILE_PATH,
            get(index)
                .post(update_profile)
                .layer(DefaultBodyLimit::max(MAX_PROFILE_UPLOAD_BYTES)),
        )
        .route("/profile/password", post(change_password))
}

/// GET /profile
#[instrument(skip_all)]
async fn index(RequireAdmin(auth): RequireAdmin, Query(flash): Query<FlashQuery>) -> Response {
    let admin = &auth.admin;

    render(&ProfileTemplate {
        admin_user: AdminUserView::from(admin),
        nav: nav_links(PROFILE_PATH),
        permissions: admin.permissions.iter().map(|p| p.label()).collect(),
        is_active: admin.is_active,
        last_login: admin
            .last_login
            .map(|t| t.format("%d %b %Y, %H:%M UTC").to_string()),
        member_since: admin.created_at.map(|t| t.format("%d %b %Y").to_string()),
        success_message: flash.success,
        error_message: flash.error,
    })
}

/// Collect the edit-profile multipart form.
async fn read_profile_form(mut multipart: Multipart) -> Result<ProfileUpdate, AppError> {
    let mut admin_name = String::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("admin_name") => {
                admin_name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            Some("image") => {
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image = ProfileImage::from_upload(content_type.as_deref(), bytes.to_vec());
            }
            _ => {}
        }
    }

    Ok(ProfileUpdate { admin_name, image })
}

/// POST /profile
#[instrument(skip_all)]
async fn update_profile(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Redirect {
    let update = match read_profile_form(multipart).await {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable profile form");
            return redirect_with(PROFILE_PATH, "error", "Could not read the submitted form");
        }
    };

    match submit_profile_update(state.backend(), &auth.token, &update).await {
        Ok(_) => redirect_with(PROFILE_PATH, "success", "Profile updated successfully!"),
        Err(e) => {
            tracing::warn!(error = %e, "Profile update failed");
            redirect_with(PROFILE_PATH, "error", &e.user_message())
        }
    }
}

#[derive(Deserialize)]
struct ChangePasswordForm {
    #[serde(default)]
    current_password: String,
    #[serde(default)]
    new_password: String,
    #[serde(default)]
    confirm_password: String,
}

/// POST /profile/password
#[instrument(skip_all)]
async fn change_password(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ChangePasswordForm>,
) -> Redirect {
    let change = PasswordChange {
        current_password: form.current_password,
        new_password: form.new_password,
        confirm_password: form.confirm_password,
    };

    if let Err(e) = change.validate() {
        return redirect_with(PROFILE_PATH, "error", &e.to_string());
    }

    match state
        .backend()
        .change_password(&auth.token, &change.current_password, &change.new_password)
        .await
    {
        Ok(()) => redirect_with(PROFILE_PATH, "success", "Password changed successfully!"),
        Err(e) => redirect_with(
            PROFILE_PATH,
            "error",
            &e.user_message_or("Failed to change password"),
        ),
    }
}
