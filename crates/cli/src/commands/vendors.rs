//! `vendors list` and the vendor lifecycle actions.

use bitnbolt_core::{
    VendorAction, VendorActionRequest, VendorId, VendorListQuery, VendorStatusFilter,
};

use super::{CliError, Context};

/// Print one page of vendors with the actions each one allows.
///
/// # Errors
///
/// Returns an error if not signed in or the backend refuses the listing.
pub async fn list(ctx: &Context, query: &VendorListQuery) -> Result<(), CliError> {
    let auth = ctx.require_admin().await?;
    let page = ctx.backend.list_vendors(&auth.token, query).await?;

    let stats = &page.stats;
    tracing::info!(
        "Vendors: {} total, {} approved, {} pending, {} suspended",
        stats.total,
        stats.approved,
        stats.pending,
        stats.suspended
    );

    if page.vendors.is_empty() {
        tracing::info!("No vendors found.");
    }
    for vendor in &page.vendors {
        let status = vendor.status();
        let actions: Vec<&str> = status
            .available_actions()
            .iter()
            .map(|a| a.as_str())
            .collect();
        tracing::info!(
            "{}  {} ({})  <{}>  [{}]  actions: {}",
            vendor.id,
            vendor.shop_name,
            vendor.seller_name,
            vendor.email,
            status,
            actions.join("/")
        );
        if let Some(reason) = &vendor.suspension_reason {
            tracing::info!("    suspended: {reason}");
        }
    }

    let pagination = &page.pagination;
    tracing::info!(
        "Page {} of {} ({} vendors)",
        pagination.page,
        pagination.pages,
        pagination.total
    );
    if let Some(next) = query.next_page(pagination) {
        tracing::info!("Next page: --page {}", next.page);
    }
    Ok(())
}

/// Build the list query from command-line filters.
///
/// # Errors
///
/// Returns an error for an unknown status filter.
pub fn list_query(
    status: &str,
    search: Option<&str>,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<VendorListQuery, String> {
    let status: VendorStatusFilter = status.parse()?;
    Ok(VendorListQuery::new(page, limit, status, search))
}

/// Approve, reject, suspend or reactivate a vendor.
///
/// # Errors
///
/// Returns a validation error before any request when suspending without a
/// reason, otherwise whatever the backend reports.
pub async fn act(
    ctx: &Context,
    vendor_id: String,
    action: VendorAction,
    reason: Option<&str>,
) -> Result<(), CliError> {
    let request = VendorActionRequest::new(VendorId::new(vendor_id), action, reason.unwrap_or(""))?;
    let auth = ctx.require_admin().await?;

    ctx.backend
        .perform_vendor_action(&auth.token, &request)
        .await?;

    tracing::info!(
        "Vendor {} {} successfully",
        request.vendor_id(),
        action.past_tense()
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_from_flags() {
        let query = list_query("suspended", Some("tea"), Some(2), None).unwrap();
        assert_eq!(query.status, VendorStatusFilter::Suspended);
        assert_eq!(query.search, "tea");
        assert_eq!(query.page, 2);

        assert!(list_query("banned", None, None, None).is_err());
    }
}
