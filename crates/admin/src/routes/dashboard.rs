//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::Query, response::Response, routing::get};
use tracing::instrument;

use crate::{filters, middleware::RequireAdmin, state::AppState};

use super::{AdminUserView, FlashQuery, NavLink, nav_links, render};

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub nav: Vec<NavLink>,
    pub permissions: Vec<String>,
    pub last_login: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// GET /
#[instrument(skip_all)]
async fn index(RequireAdmin(auth): RequireAdmin, Query(flash): Query<FlashQuery>) -> Response {
    let admin = &auth.admin;

    render(&DashboardTemplate {
        admin_user: AdminUserView::from(admin),
        nav: nav_links("/"),
        permissions: admin.permissions.iter().map(|p| p.label()).collect(),
        last_login: admin
            .last_login
            .map(|t| t.format("%d %b %Y, %H:%M UTC").to_string()),
        success_message: flash.success,
        error_message: flash.error,
    })
}
