//! Core types for the BitnBolt admin dashboard.
//!
//! This module provides type-safe wrappers for the backend's records and the
//! pure rules the dashboard applies before talking to it.

pub mod admin;
pub mod email;
pub mod id;
pub mod pagination;
pub mod role;
pub mod validation;
pub mod vendor;

pub use admin::{Admin, AdminStats};
pub use email::{Email, EmailError};
pub use id::*;
pub use pagination::{DEFAULT_PAGE_LIMIT, Pagination, VendorListQuery, VendorStatusFilter};
pub use role::{AdminRole, Permission};
pub use validation::{
    MIN_PASSWORD_LENGTH, PasswordChange, PasswordReset, ValidationError, required,
};
pub use vendor::{
    AddressType, PickupAddress, Vendor, VendorAction, VendorActionPayload, VendorActionRequest,
    VendorEndpoint, VendorStats, VendorStatus,
};
