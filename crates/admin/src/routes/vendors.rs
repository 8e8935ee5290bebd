//! Vendor management route handlers.
//!
//! The list is driven entirely by the query string: status tab, search term
//! and page. Every action redirects back to the exact list it came from so
//! the backend's new state is shown.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Redirect, Response},
    routing::{get, post},
};
use bitnbolt_core::{
    Pagination, Vendor, VendorAction, VendorActionRequest, VendorId, VendorListQuery,
    VendorStats, VendorStatus, VendorStatusFilter,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{filters, middleware::RequireAdmin, state::AppState};

use super::{AdminUserView, NavLink, nav_links, redirect_with, render};

const VENDORS_PATH: &str = "/vendors";

// =============================================================================
// Views
// =============================================================================

/// Action button offered for a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub value: &'static str,
    pub label: &'static str,
    pub requires_reason: bool,
}

impl From<VendorAction> for ActionView {
    fn from(action: VendorAction) -> Self {
        Self {
            value: action.as_str(),
            label: action.label(),
            requires_reason: action.requires_reason(),
        }
    }
}

/// Vendor row for templates.
#[derive(Debug, Clone)]
pub struct VendorView {
    pub id: String,
    pub seller_name: String,
    pub shop_name: String,
    pub email: String,
    pub phone: String,
    pub gst_number: Option<String>,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub suspension_reason: Option<String>,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub address: Option<String>,
    pub joined: Option<String>,
    pub actions: Vec<ActionView>,
}

impl From<&Vendor> for VendorView {
    fn from(vendor: &Vendor) -> Self {
        let status = vendor.status();
        Self {
            id: vendor.id.to_string(),
            seller_name: vendor.seller_name.clone(),
            shop_name: vendor.shop_name.clone(),
            email: vendor.email.to_string(),
            phone: vendor.phone.clone(),
            gst_number: vendor.gst_number.clone(),
            status_label: status.label(),
            status_class: match status {
                VendorStatus::Pending => "pending",
                VendorStatus::Active => "active",
                VendorStatus::Suspended => "suspended",
            },
            suspension_reason: vendor.suspension_reason.clone(),
            email_verified: vendor.email_verified,
            phone_verified: vendor.phone_verified,
            address: vendor.default_address().map(|a| a.one_line()),
            joined: vendor.created_at.map(|t| t.format("%d %b %Y").to_string()),
            actions: status
                .available_actions()
                .iter()
                .copied()
                .map(ActionView::from)
                .collect(),
        }
    }
}

/// Status filter tab.
#[derive(Debug, Clone)]
pub struct FilterTab {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Vendors page template.
#[derive(Template)]
#[template(path = "vendors/index.html")]
pub struct VendorsIndexTemplate {
    pub admin_user: AdminUserView,
    pub nav: Vec<NavLink>,
    pub vendors: Vec<VendorView>,
    pub stats: VendorStats,
    pub pagination: Pagination,
    pub tabs: Vec<FilterTab>,
    pub search: String,
    pub status: &'static str,
    /// Page size to keep when searching, if not the default.
    pub custom_limit: Option<u32>,
    pub current_url: String,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

// =============================================================================
// Query handling
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct VendorsParams {
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<String>,
    search: Option<String>,
    success: Option<String>,
    error: Option<String>,
}

impl VendorsParams {
    fn list_query(&self) -> VendorListQuery {
        let status = self
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        VendorListQuery::new(self.page, self.limit, status, self.search.as_deref())
    }
}

/// Dashboard URL showing `query`.
#[must_use]
pub fn list_url(query: &VendorListQuery) -> String {
    let mut pairs = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in query.query_pairs() {
        if key == "limit" && query.limit == bitnbolt_core::DEFAULT_PAGE_LIMIT {
            continue;
        }
        pairs.append_pair(key, &value);
    }
    format!("{VENDORS_PATH}?{}", pairs.finish())
}

/// Only redirect back into the vendor list.
fn safe_return_path(return_to: Option<&str>) -> String {
    return_to
        .filter(|path| {
            (*path == VENDORS_PATH || path.starts_with("/vendors?")) && !path.contains("//")
        })
        .map_or_else(|| VENDORS_PATH.to_string(), str::to_string)
}

/// Drop any earlier flash message so messages don't pile up across actions.
fn strip_flash(path: &str) -> String {
    let Some((base, query)) = path.split_once('?') else {
        return path.to_string();
    };
    let kept: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .filter(|(k, _)| k != "success" && k != "error")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        return base.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(kept)
        .finish();
    format!("{base}?{query}")
}

// =============================================================================
// Handlers
// =============================================================================

/// Build the vendors router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(VENDORS_PATH, get(index))
        .route("/vendors/{id}/action", post(perform_action))
}

/// GET /vendors
#[instrument(skip(auth, state))]
async fn index(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<VendorsParams>,
) -> Response {
    let query = params.list_query();

    let (vendors, stats, pagination, load_error) =
        match state.backend().list_vendors(&auth.token, &query).await {
            Ok(page) => (page.vendors, page.stats, page.pagination, None),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch vendors");
                (
                    Vec::new(),
                    VendorStats::default(),
                    Pagination::default(),
                    Some(e.user_message_or("Failed to fetch vendors")),
                )
            }
        };

    let tabs = VendorStatusFilter::ALL
        .into_iter()
        .map(|filter| FilterTab {
            label: filter.label(),
            href: list_url(&query.with_status(filter)),
            active: filter == query.status,
        })
        .collect();

    let template = VendorsIndexTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        nav: nav_links(VENDORS_PATH),
        vendors: vendors.iter().map(VendorView::from).collect(),
        stats,
        tabs,
        search: query.search.clone(),
        status: query.status.as_str(),
        custom_limit: (query.limit != bitnbolt_core::DEFAULT_PAGE_LIMIT).then_some(query.limit),
        current_url: list_url(&query),
        previous_url: query.previous_page(&pagination).as_ref().map(list_url),
        next_url: query.next_page(&pagination).as_ref().map(list_url),
        pagination,
        success_message: params.success,
        error_message: load_error.or(params.error),
    };

    render(&template)
}

#[derive(Debug, Deserialize)]
struct VendorActionForm {
    action: String,
    #[serde(default)]
    reason: String,
    return_to: Option<String>,
}

/// POST /vendors/{id}/action
#[instrument(skip(auth, state, form), fields(action = %form.action))]
async fn perform_action(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<VendorActionForm>,
) -> Redirect {
    let back = strip_flash(&safe_return_path(form.return_to.as_deref()));

    let request = match form
        .action
        .parse::<VendorAction>()
        .and_then(|action| VendorActionRequest::new(VendorId::new(id), action, &form.reason))
    {
        Ok(request) => request,
        Err(e) => return redirect_with(&back, "error", &e.to_string()),
    };
    let action = request.action();

    match state
        .backend()
        .perform_vendor_action(&auth.token, &request)
        .await
    {
        Ok(()) => {
            tracing::info!(
                vendor_id = %request.vendor_id(),
                admin_id = %auth.admin.id,
                "Vendor {}",
                action.past_tense()
            );
            redirect_with(
                &back,
                "success",
                &format!("Vendor {} successfully", action.past_tense()),
            )
        }
        Err(e) => redirect_with(
            &back,
            "error",
            &e.user_message_or(&format!("Failed to {} vendor", action.as_str())),
        ),
    }
}
