//! BitnBolt Core - Shared domain types.
//!
//! This crate provides the types used by every BitnBolt admin component:
//! - `admin` - Server-rendered admin dashboard
//! - `cli` - Command-line access to the same backend operations
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. The backend is the source of truth for every record defined here;
//! these types describe what it returns and validate what we send to it.
//!
//! # Modules
//!
//! - [`types`] - Ids, email, admin roles and permissions, vendor lifecycle,
//!   list queries and client-side validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
