//! xCommerce Core - Shared storefront types.
//!
//! This crate provides the types the storefront client works with:
//! - typed ids parsed from marker attributes
//! - prices and cart line totals
//! - theme preference, toast kinds, and quantity clamping
//! - the JSON wire formats of the cart and search endpoints
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no DOM
//! access, no HTTP clients. This keeps it testable natively and usable from
//! the `wasm32` client.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers and small value types
//! - [`api`] - Request and response bodies of the storefront endpoints

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod types;

pub use api::*;
pub use types::*;
