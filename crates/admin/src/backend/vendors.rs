//! Vendor listing and lifecycle endpoints.

use bitnbolt_core::{VendorActionRequest, VendorListQuery};
use reqwest::Method;
use secrecy::SecretString;
use serde::de::IgnoredAny;
use tracing::instrument;

use super::{BackendClient, BackendError, VendorPage};

impl BackendClient {
    /// One page of vendors with the counters and pagination for the query.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token), fields(page = query.page, status = query.status.as_str()))]
    pub async fn list_vendors(
        &self,
        token: &SecretString,
        query: &VendorListQuery,
    ) -> Result<VendorPage, BackendError> {
        let mut url = self.endpoint("/api/admin/vendors/list")?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        self.execute(self.request(Method::GET, url, Some(token)))
            .await?
            .into_data()
    }

    /// Apply an approve/reject/suspend/activate action.
    ///
    /// The request is already validated; the caller refetches the list after.
    ///
    /// # Errors
    ///
    /// Returns error if the backend refuses or the request fails.
    #[instrument(
        skip(self, token, request),
        fields(vendor_id = %request.vendor_id(), action = request.action().as_str())
    )]
    pub async fn perform_vendor_action(
        &self,
        token: &SecretString,
        request: &VendorActionRequest,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(request.action().endpoint().path())?;
        let builder = self
            .request(Method::PUT, url, Some(token))
            .json(&request.payload());
        self.execute::<IgnoredAny>(builder).await?;
        Ok(())
    }
}
