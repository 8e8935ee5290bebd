//! Business logic services for the admin dashboard.
//!
//! # Services
//!
//! - `session_guard` - Token check shared by every protected page and the CLI
//! - `profile` - Ordered image-then-details profile submission

pub mod profile;
pub mod session_guard;

pub use profile::{
    ProfileImage, ProfileUpdate, ProfileUpdateError, ProfileUpdated, submit_profile_update,
};
pub use session_guard::{
    GuardOutcome, MemoryTokenStore, TokenStore, TokenStoreError, check_session,
};
