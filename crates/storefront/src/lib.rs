//! xCommerce storefront client.
//!
//! Browser-side behaviour for the server-rendered storefront pages: the mobile
//! menu, cart buttons, theme toggle, live search, image gallery, quantity
//! steppers, tooltips and toast notifications.
//!
//! Everything except [`dom`] is target independent. The controller talks to
//! the page through the [`view::PageView`] trait, so the handlers run under
//! native tests against a recording view and a mock HTTP server.

#![cfg_attr(not(target_arch = "wasm32"), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod markers;
pub mod render;
pub mod toast;
pub mod tooltip;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use api::StorefrontApi;
pub use config::StorefrontConfig;
pub use controller::PageController;
pub use error::{Result, UiError};
