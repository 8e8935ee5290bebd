//! Vendor records and the vendor lifecycle.
//!
//! The backend stores two independent flags, `approved` and `suspended`.
//! [`VendorStatus::derive`] collapses them into one of three mutually
//! exclusive states, and the state decides which [`VendorAction`]s are
//! offered. Suspension always wins over approval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, ValidationError, VendorId};

/// Pickup address category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    Primary,
    Secondary,
    Warehouse,
}

/// Where orders are collected from a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupAddress {
    pub address_type: AddressType,
    pub address_name: String,
    pub building_number: String,
    pub street_name: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl PickupAddress {
    /// Single-line rendering, e.g. `12 MG Road, Pune, Maharashtra 411001, India`.
    #[must_use]
    pub fn one_line(&self) -> String {
        format!(
            "{} {}, {}, {} {}, {}",
            self.building_number,
            self.street_name,
            self.city,
            self.state,
            self.postal_code,
            self.country
        )
    }
}

/// A seller account on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(rename = "_id")]
    pub id: VendorId,
    #[serde(rename = "seller_name")]
    pub seller_name: String,
    pub email: Email,
    pub phone: String,
    pub shop_name: String,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub pickup_addresses: Vec<PickupAddress>,
    pub approved: bool,
    pub suspended: bool,
    #[serde(default)]
    pub suspension_reason: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub phone_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Vendor {
    /// Display status derived from the two stored flags.
    #[must_use]
    pub const fn status(&self) -> VendorStatus {
        VendorStatus::derive(self.approved, self.suspended)
    }

    /// The address marked default, falling back to the first one.
    #[must_use]
    pub fn default_address(&self) -> Option<&PickupAddress> {
        self.pickup_addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.pickup_addresses.first())
    }
}

/// Counters returned with every vendor list page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorStats {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub suspended: u64,
    pub email_verified: u64,
    pub phone_verified: u64,
}

/// Vendor display status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorStatus {
    /// Neither approved nor suspended.
    Pending,
    /// Approved and not suspended.
    Active,
    /// Suspended, whatever the approval flag says.
    Suspended,
}

impl VendorStatus {
    /// Derive the status from the stored flags. `suspended` takes precedence.
    #[must_use]
    pub const fn derive(approved: bool, suspended: bool) -> Self {
        if suspended {
            Self::Suspended
        } else if approved {
            Self::Active
        } else {
            Self::Pending
        }
    }

    /// Actions an admin may take from this status.
    #[must_use]
    pub const fn available_actions(self) -> &'static [VendorAction] {
        match self {
            Self::Pending => &[VendorAction::Approve, VendorAction::Reject],
            Self::Active => &[VendorAction::Suspend],
            Self::Suspended => &[VendorAction::Activate],
        }
    }

    /// Whether `action` is offered from this status.
    #[must_use]
    pub fn permits(self, action: VendorAction) -> bool {
        self.available_actions().contains(&action)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Suspended => "Suspended",
        }
    }
}

impl std::fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which backend endpoint carries an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorEndpoint {
    /// `PUT /api/admin/vendors/approve` with an `approved` flag.
    Approval,
    /// `PUT /api/admin/vendors/suspend` with a `suspended` flag.
    Suspension,
}

impl VendorEndpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Approval => "/api/admin/vendors/approve",
            Self::Suspension => "/api/admin/vendors/suspend",
        }
    }
}

/// An admin action on a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorAction {
    Approve,
    Reject,
    Suspend,
    Activate,
}

impl VendorAction {
    #[must_use]
    pub const fn endpoint(self) -> VendorEndpoint {
        match self {
            Self::Approve | Self::Reject => VendorEndpoint::Approval,
            Self::Suspend | Self::Activate => VendorEndpoint::Suspension,
        }
    }

    /// Value sent for the endpoint's flag (`approved` or `suspended`).
    #[must_use]
    pub const fn flag(self) -> bool {
        matches!(self, Self::Approve | Self::Suspend)
    }

    /// Only suspension needs a written justification.
    #[must_use]
    pub const fn requires_reason(self) -> bool {
        matches!(self, Self::Suspend)
    }

    /// Form/CLI value, e.g. `approve`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Suspend => "suspend",
            Self::Activate => "activate",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::Suspend => "Suspend",
            Self::Activate => "Activate",
        }
    }

    /// Past-tense verb for confirmation messages.
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
            Self::Suspend => "suspended",
            Self::Activate => "activated",
        }
    }
}

impl std::str::FromStr for VendorAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "suspend" => Ok(Self::Suspend),
            "activate" => Ok(Self::Activate),
            other => Err(ValidationError::UnknownVendorAction(other.to_owned())),
        }
    }
}

/// A validated vendor action, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorActionRequest {
    vendor_id: VendorId,
    action: VendorAction,
    reason: Option<String>,
}

impl VendorActionRequest {
    /// Validate an action before any request is made.
    ///
    /// The reason is trimmed; a blank reason becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySuspensionReason`] when suspending
    /// without a non-blank reason.
    pub fn new(
        vendor_id: VendorId,
        action: VendorAction,
        reason: &str,
    ) -> Result<Self, ValidationError> {
        let reason = Some(reason.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_owned);

        if action.requires_reason() && reason.is_none() {
            return Err(ValidationError::EmptySuspensionReason);
        }

        Ok(Self {
            vendor_id,
            action,
            reason,
        })
    }

    #[must_use]
    pub const fn vendor_id(&self) -> &VendorId {
        &self.vendor_id
    }

    #[must_use]
    pub const fn action(&self) -> VendorAction {
        self.action
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// JSON body for [`VendorAction::endpoint`].
    #[must_use]
    pub fn payload(&self) -> VendorActionPayload<'_> {
        let flag = self.action.flag();
        let (approved, suspended) = match self.action.endpoint() {
            VendorEndpoint::Approval => (Some(flag), None),
            VendorEndpoint::Suspension => (None, Some(flag)),
        };
        VendorActionPayload {
            vendor_id: &self.vendor_id,
            approved,
            suspended,
            reason: self.reason.as_deref(),
        }
    }
}

/// Wire body of a vendor action.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorActionPayload<'a> {
    pub vendor_id: &'a VendorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_precedence_all_pairs() {
        assert_eq!(VendorStatus::derive(false, false), VendorStatus::Pending);
        assert_eq!(VendorStatus::derive(true, false), VendorStatus::Active);
        assert_eq!(VendorStatus::derive(false, true), VendorStatus::Suspended);
        assert_eq!(VendorStatus::derive(true, true), VendorStatus::Suspended);
    }

    #[test]
    fn test_available_actions() {
        assert_eq!(
            VendorStatus::Pending.available_actions(),
            &[VendorAction::Approve, VendorAction::Reject]
        );
        assert_eq!(
            VendorStatus::Active.available_actions(),
            &[VendorAction::Suspend]
        );
        assert_eq!(
            VendorStatus::Suspended.available_actions(),
            &[VendorAction::Activate]
        );
        assert!(!VendorStatus::Suspended.permits(VendorAction::Approve));
    }

    #[test]
    fn test_action_endpoints_and_flags() {
        assert_eq!(VendorAction::Approve.endpoint(), VendorEndpoint::Approval);
        assert_eq!(VendorAction::Reject.endpoint(), VendorEndpoint::Approval);
        assert_eq!(VendorAction::Suspend.endpoint(), VendorEndpoint::Suspension);
        assert_eq!(VendorAction::Activate.endpoint(), VendorEndpoint::Suspension);
        assert!(VendorAction::Approve.flag());
        assert!(!VendorAction::Reject.flag());
        assert!(VendorAction::Suspend.flag());
        assert!(!VendorAction::Activate.flag());
    }

    #[test]
    fn test_suspend_requires_reason() {
        for blank in ["", "   ", "\n\t"] {
            assert_eq!(
                VendorActionRequest::new(VendorId::new("v1"), VendorAction::Suspend, blank),
                Err(ValidationError::EmptySuspensionReason)
            );
        }
        for action in [
            VendorAction::Approve,
            VendorAction::Reject,
            VendorAction::Activate,
        ] {
            assert!(VendorActionRequest::new(VendorId::new("v1"), action, "").is_ok());
        }
    }

    #[test]
    fn test_approve_payload_has_no_reason_key() {
        let request =
            VendorActionRequest::new(VendorId::new("v1"), VendorAction::Approve, "").unwrap();
        assert_eq!(
            serde_json::to_value(request.payload()).unwrap(),
            json!({"vendorId": "v1", "approved": true})
        );
    }

    #[test]
    fn test_suspend_payload_trims_reason() {
        let request = VendorActionRequest::new(
            VendorId::new("v9"),
            VendorAction::Suspend,
            "  counterfeit listings ",
        )
        .unwrap();
        assert_eq!(request.reason(), Some("counterfeit listings"));
        assert_eq!(
            serde_json::to_value(request.payload()).unwrap(),
            json!({"vendorId": "v9", "suspended": true, "reason": "counterfeit listings"})
        );
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("reject".parse::<VendorAction>(), Ok(VendorAction::Reject));
        assert!(matches!(
            "ban".parse::<VendorAction>(),
            Err(ValidationError::UnknownVendorAction(_))
        ));
    }

    #[test]
    fn test_vendor_deserialize_and_status() {
        let vendor: Vendor = serde_json::from_value(json!({
            "_id": "v1",
            "seller_name": "Kiran Traders",
            "email": "kiran@traders.in",
            "phone": "+91 98450 00000",
            "shopName": "Kiran Hardware",
            "pickupAddresses": [
                {
                    "addressType": "warehouse",
                    "addressName": "Main godown",
                    "buildingNumber": "12",
                    "streetName": "MG Road",
                    "city": "Pune",
                    "state": "Maharashtra",
                    "postalCode": "411001",
                    "country": "India",
                    "isDefault": true
                }
            ],
            "approved": true,
            "suspended": true,
            "suspensionReason": "KYC expired",
            "emailVerified": true,
            "phoneVerified": false,
            "createdAt": "2026-03-01T10:00:00Z",
            "updatedAt": "2026-03-05T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(vendor.status(), VendorStatus::Suspended);
        let address = vendor.default_address().unwrap();
        assert_eq!(address.address_type, AddressType::Warehouse);
        assert_eq!(
            address.one_line(),
            "12 MG Road, Pune, Maharashtra 411001, India"
        );
    }
}
