//! The seams between the controller and the page.
//!
//! [`PageView`] is every DOM read and write the handlers perform, expressed in
//! storefront terms. [`PreferenceStore`] is the key/value persistence behind
//! the theme preference. The browser implementations live in `dom`; tests use
//! in-memory ones.

use std::collections::HashMap;
use std::sync::Mutex;

use xcommerce_core::{CartBadge, CartLine, Price};

use crate::error::{Result, UiError};
use crate::toast::Toast;

/// Page operations used by [`PageController`](crate::controller::PageController).
pub trait PageView {
    /// Handle to an element an action was triggered from (a cart button).
    type Element;

    /// Toggle the menu position, overlay visibility and body scroll lock.
    fn toggle_mobile_menu(&self);

    /// Enter or leave the loading state of a button.
    ///
    /// Entering remembers the current label, shows the loading label and
    /// disables the button; leaving restores both.
    fn set_loading(&self, button: &Self::Element, loading: bool);

    /// Show the "added" label on a button, reverting it after a delay.
    fn show_added(&self, button: &Self::Element);

    /// Update the header cart-count badge.
    fn set_cart_badge(&self, badge: &CartBadge);

    /// Remove the cart line containing `button`.
    fn remove_cart_item(&self, button: &Self::Element);

    /// Every cart line currently on the page.
    fn cart_lines(&self) -> Vec<CartLine>;

    /// Show the recomputed cart total.
    fn set_cart_total(&self, total: &Price);

    /// Whether the dark theme class is on the root element.
    fn is_dark(&self) -> bool;

    /// Add or remove the dark theme class on the root element.
    fn set_dark(&self, dark: bool);

    /// Replace the search results markup and reveal the container.
    fn show_search_results(&self, html: &str);

    /// Empty and hide the search results container.
    fn clear_search_results(&self);

    /// Append a toast notification.
    fn show_toast(&self, toast: &Toast);
}

/// String key/value persistence.
pub trait PreferenceStore {
    /// Read a value.
    fn load(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Storage` if the backing store rejects the write.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory [`PreferenceStore`].
///
/// Used when the browser refuses access to `localStorage` (private browsing,
/// storage disabled), so preferences still hold for the current page.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .map_err(|e| UiError::Storage(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
