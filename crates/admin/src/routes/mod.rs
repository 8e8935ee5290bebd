//! HTTP route handlers for the admin dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check
//!
//! # Auth
//! GET  /auth/signin               - Sign-in page
//! POST /auth/signin               - Exchange credentials for a backend token
//! POST /auth/signout              - Forget the token
//! GET  /auth/forgot-password      - Request form, or reset form with ?token=
//! POST /auth/forgot-password      - Send the reset email
//! POST /auth/reset-password       - Set a new password with the emailed token
//!
//! # Dashboard
//! GET  /                          - Overview
//!
//! # Admins (mutations super admin only)
//! GET  /admins                    - List admins with stats
//! POST /admins                    - Create admin
//! POST /admins/{id}/update        - Update admin
//! POST /admins/{id}/delete        - Delete admin
//!
//! # Vendors
//! GET  /vendors                   - Filtered, searched, paginated list
//! POST /vendors/{id}/action       - Approve / reject / suspend / activate
//!
//! # Profile
//! GET  /profile                   - Own profile
//! POST /profile                   - Update name and image (multipart)
//! POST /profile/password          - Change password
//! ```
//!
//! Every mutation answers with a redirect back to its page carrying a
//! `?success=` or `?error=` message, so the page is refetched from the backend.

pub mod admins;
pub mod auth;
pub mod dashboard;
pub mod profile;
pub mod vendors;

use askama::Template;
use axum::{
    Router,
    response::{Html, IntoResponse, Redirect, Response},
};
use bitnbolt_core::Admin;
use serde::Deserialize;

use crate::state::AppState;

/// Build the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(admins::router())
        .merge(vendors::router())
        .merge(profile::router())
}

// =============================================================================
// Shared page pieces
// =============================================================================

/// Signed-in admin as shown in the navigation shell.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_label: &'static str,
    pub is_super_admin: bool,
    pub profile_image: Option<String>,
}

impl From<&Admin> for AdminUserView {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id.to_string(),
            name: admin.admin_name.clone(),
            email: admin.email.to_string(),
            role_label: admin.role.label(),
            is_super_admin: admin.can_manage_admins(),
            profile_image: admin.profile_image.clone(),
        }
    }
}

/// Sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const NAV: [(&str, &str); 4] = [
    ("/", "Dashboard"),
    ("/admins", "Admins"),
    ("/vendors", "Vendors"),
    ("/profile", "Profile"),
];

/// Sidebar links with the current section highlighted.
#[must_use]
pub fn nav_links(current_path: &str) -> Vec<NavLink> {
    NAV.iter()
        .map(|&(href, label)| NavLink {
            href,
            label,
            active: if href == "/" {
                current_path == "/"
            } else {
                current_path.starts_with(href)
            },
        })
        .collect()
}

/// `?success=` / `?error=` messages carried across a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Redirect to `path` with a message in the query string.
pub(crate) fn redirect_with(path: &str, kind: &str, message: &str) -> Redirect {
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!(
        "{path}{separator}{kind}={}",
        urlencoding::encode(message)
    ))
}

/// Render a template into an HTML response.
pub(crate) fn render<T: Template>(template: &T) -> Response {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
    .into_response()
}
