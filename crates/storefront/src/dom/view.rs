use gloo::timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};
use xcommerce_core::{CartBadge, CartLine, Price, Theme};

use super::{millis, query_all};
use crate::config::StorefrontConfig;
use crate::toast::{CONTAINER_ID, Toast};
use crate::view::PageView;

const ORIGINAL_TEXT_KEY: &str = "originalText";

/// [`PageView`] over the live document.
pub struct DomView {
    document: Document,
    config: StorefrontConfig,
}

impl DomView {
    pub const fn new(document: Document, config: StorefrontConfig) -> Self {
        Self { document, config }
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }
}

impl PageView for DomView {
    type Element = HtmlElement;

    fn toggle_mobile_menu(&self) {
        if let Some(menu) = self.query("[data-mobile-menu]") {
            let classes = menu.class_list();
            let _ = classes.toggle("translate-x-0");
            let _ = classes.toggle("-translate-x-full");
        }
        if let Some(overlay) = self.query("[data-mobile-overlay]") {
            let _ = overlay.class_list().toggle("hidden");
        }
        if let Some(body) = self.document.body() {
            let _ = body.class_list().toggle("overflow-hidden");
        }
    }

    fn set_loading(&self, button: &HtmlElement, loading: bool) {
        let dataset = button.dataset();
        let labels = &self.config.labels;

        if loading {
            let current = button.text_content().unwrap_or_default();
            let _ = dataset.set(ORIGINAL_TEXT_KEY, &current);
            button.set_text_content(Some(&labels.loading));
        } else {
            let original = dataset
                .get(ORIGINAL_TEXT_KEY)
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| labels.fallback.clone());
            button.set_text_content(Some(&original));
        }
        let _ = button.toggle_attribute_with_force("disabled", loading);
    }

    fn show_added(&self, button: &HtmlElement) {
        let labels = &self.config.labels;
        button.set_text_content(Some(&labels.added));

        let button = button.clone();
        let label = labels.add_to_cart.clone();
        Timeout::new(millis(self.config.added_reset), move || {
            button.set_text_content(Some(&label));
        })
        .forget();
    }

    fn set_cart_badge(&self, badge: &CartBadge) {
        let Some(count) = self.query("[data-cart-count]") else {
            return;
        };
        count.set_text_content(Some(&badge.text));
        let _ = count.class_list().toggle_with_force("hidden", badge.hidden);
    }

    fn remove_cart_item(&self, button: &HtmlElement) {
        if let Ok(Some(item)) = button.closest("[data-cart-item]") {
            item.remove();
        }
    }

    fn cart_lines(&self) -> Vec<CartLine> {
        query_all(&self.document, "[data-cart-item]")
            .iter()
            .map(|item| {
                let price = item.get_attribute("data-price");
                let quantity = item
                    .query_selector("[data-quantity]")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value());
                CartLine::from_attributes(price.as_deref(), quantity.as_deref())
            })
            .collect()
    }

    fn set_cart_total(&self, total: &Price) {
        if let Some(el) = self.query("[data-cart-total]") {
            el.set_text_content(Some(&total.display()));
        }
    }

    fn is_dark(&self) -> bool {
        self.document
            .document_element()
            .is_some_and(|root| root.class_list().contains(Theme::DARK_CLASS))
    }

    fn set_dark(&self, dark: bool) {
        if let Some(root) = self.document.document_element() {
            let _ = root.class_list().toggle_with_force(Theme::DARK_CLASS, dark);
        }
    }

    fn show_search_results(&self, html: &str) {
        if let Some(container) = self.query("[data-search-results]") {
            container.set_inner_html(html);
            let _ = container.class_list().remove_1("hidden");
        }
    }

    fn clear_search_results(&self) {
        if let Some(container) = self.query("[data-search-results]") {
            container.set_inner_html("");
            let _ = container.class_list().add_1("hidden");
        }
    }

    fn show_toast(&self, toast: &Toast) {
        let Some(container) = self.document.get_element_by_id(CONTAINER_ID) else {
            return;
        };
        let html = match toast.render() {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Failed to render toast");
                return;
            }
        };
        let Ok(element) = self.document.create_element("div") else {
            return;
        };

        element.set_class_name(&toast.class_name());
        element.set_inner_html(&html);
        if container.append_child(&element).is_err() {
            return;
        }

        Timeout::new(millis(self.config.toast_timeout), move || {
            if element.parent_node().is_some() {
                element.remove();
            }
        })
        .forget();
    }
}
