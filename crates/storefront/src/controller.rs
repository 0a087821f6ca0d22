//! Page controller: one handler per storefront interaction.
//!
//! Handlers never return errors. Every failure is logged and, for actions the
//! shopper started, reported with a toast; the page itself keeps working.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, instrument, warn};
use xcommerce_core::{
    AddToCartRequest, CartBadge, CartItemId, Price, ProductMarkers, SearchQuery, Theme,
    ToastKind, cart_total,
};

use crate::api::StorefrontApi;
use crate::config::StorefrontConfig;
use crate::error::UiError;
use crate::render::render_search_results;
use crate::toast::Toast;
use crate::view::{PageView, PreferenceStore};

const ADDED_MESSAGE: &str = "Product added to cart";
const ADD_FAILED_MESSAGE: &str = "Failed to add product to cart";
const REMOVED_MESSAGE: &str = "Item removed from cart";
const REMOVE_FAILED_MESSAGE: &str = "Failed to remove item";

/// Generation counter for search requests.
///
/// Every query takes a ticket; only the response holding the latest ticket
/// may touch the results container.
#[derive(Debug, Default)]
pub struct SearchGeneration(AtomicU64);

impl SearchGeneration {
    /// Start a new generation and return its ticket.
    pub fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    /// Whether `ticket` is still the latest.
    #[must_use]
    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

/// Clears a button's loading state when dropped.
struct LoadingGuard<'a, V: PageView> {
    view: &'a V,
    button: &'a V::Element,
}

impl<'a, V: PageView> LoadingGuard<'a, V> {
    fn start(view: &'a V, button: &'a V::Element) -> Self {
        view.set_loading(button, true);
        Self { view, button }
    }
}

impl<V: PageView> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_loading(self.button, false);
    }
}

/// Storefront page controller.
pub struct PageController<V, S> {
    config: StorefrontConfig,
    api: StorefrontApi,
    view: V,
    store: S,
    searches: SearchGeneration,
}

impl<V: PageView, S: PreferenceStore> PageController<V, S> {
    /// Create a controller.
    pub fn new(config: StorefrontConfig, api: StorefrontApi, view: V, store: S) -> Self {
        Self {
            config,
            api,
            view,
            store,
            searches: SearchGeneration::default(),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the page view.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Get a reference to the preference store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Open or close the mobile menu.
    pub fn toggle_mobile_menu(&self) {
        debug!("Toggling mobile menu");
        self.view.toggle_mobile_menu();
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add the product described by a button's markers to the cart.
    #[instrument(skip(self, button))]
    pub async fn add_to_cart(&self, button: &V::Element, markers: &ProductMarkers) {
        let request = match AddToCartRequest::from_markers(markers) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Add to cart button has unusable markers");
                self.report(&UiError::from(e), ADD_FAILED_MESSAGE);
                return;
            }
        };

        let guard = LoadingGuard::start(&self.view, button);
        let outcome = self.api.add_to_cart(&request).await;
        drop(guard);

        match outcome {
            Ok(response) => {
                if let Some(count) = response.cart_count {
                    self.view.set_cart_badge(&CartBadge::from_count(count));
                }
                if let Some(subtotal) = response.cart_subtotal {
                    self.view.set_cart_total(&Price::usd(subtotal));
                }
                self.view.show_toast(&Toast::success(ADDED_MESSAGE));
                self.view.show_added(button);
            }
            Err(e) => {
                warn!(error = %e, "Failed to add to cart");
                self.report(&e, ADD_FAILED_MESSAGE);
            }
        }
    }

    /// Remove the cart line a button belongs to.
    #[instrument(skip(self, button))]
    pub async fn remove_from_cart(&self, button: &V::Element, item_id: Option<&str>) {
        let outcome = match CartItemId::from_marker(item_id) {
            Ok(id) => self.api.remove_from_cart(id).await,
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(()) => {
                self.view.remove_cart_item(button);
                self.update_cart_totals();
                self.view.show_toast(&Toast::success(REMOVED_MESSAGE));
            }
            Err(e) => {
                warn!(error = %e, "Failed to remove cart item");
                self.view.show_toast(&Toast::error(REMOVE_FAILED_MESSAGE));
            }
        }
    }

    /// Recompute the cart total from the lines on the page.
    ///
    /// A total too large to represent leaves the displayed total unchanged.
    pub fn update_cart_totals(&self) {
        let lines = self.view.cart_lines();
        let Some(total) = cart_total(&lines) else {
            warn!(lines = lines.len(), "Cart total overflowed; keeping displayed total");
            return;
        };
        self.view.set_cart_total(&Price::usd(total));
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Switch between light and dark and remember the choice.
    pub fn toggle_theme(&self) {
        let theme = Theme::from_dark_class(self.view.is_dark()).toggled();
        self.view.set_dark(theme.is_dark());

        if let Err(e) = self.store.save(Theme::STORAGE_KEY, theme.as_str()) {
            warn!(error = %e, "Failed to persist theme");
        }
        debug!(%theme, "Theme toggled");
    }

    /// Apply the remembered theme, if any.
    pub fn apply_saved_theme(&self) {
        let Some(theme) = self
            .store
            .load(Theme::STORAGE_KEY)
            .as_deref()
            .and_then(Theme::parse)
        else {
            return;
        };
        self.view.set_dark(theme.is_dark());
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Search for the current input and render the results.
    ///
    /// Input below the minimum length clears the results instead. A response
    /// that arrives after a newer query was issued (or after the input was
    /// cleared) is dropped.
    pub async fn handle_search(&self, input: &str) {
        let Some(query) = SearchQuery::parse(input, self.config.min_query_chars) else {
            self.searches.invalidate();
            self.view.clear_search_results();
            return;
        };

        let ticket = self.searches.issue();
        let results = match self.api.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, %query, "Search failed");
                return;
            }
        };

        if !self.searches.is_current(ticket) {
            debug!(%query, "Discarding stale search response");
            return;
        }
        let Some(results) = results else {
            debug!(%query, "Search response without results");
            return;
        };

        match render_search_results(&results, &self.config.placeholder_image) {
            Ok(html) => self.view.show_search_results(&html),
            Err(e) => warn!(error = %e, "Failed to render search results"),
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Show a toast.
    pub fn notify(&self, message: &str, kind: ToastKind) {
        self.view.show_toast(&Toast::new(message, kind));
    }

    fn report(&self, error: &UiError, fallback: &str) {
        self.view
            .show_toast(&Toast::error(error.user_message(fallback)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_generation() {
        let searches = SearchGeneration::default();
        let first = searches.issue();
        assert!(searches.is_current(first));

        let second = searches.issue();
        assert!(!searches.is_current(first));
        assert!(searches.is_current(second));

        searches.invalidate();
        assert!(!searches.is_current(second));
    }
}
