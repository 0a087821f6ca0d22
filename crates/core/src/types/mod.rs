//! Core types for the storefront client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod quantity;
pub mod search;
pub mod theme;
pub mod toast;

pub use cart::{CartBadge, CartLine, cart_total};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use quantity::{QuantityStepper, parse_int_prefix, parse_quantity};
pub use search::SearchQuery;
pub use theme::Theme;
pub use toast::ToastKind;
