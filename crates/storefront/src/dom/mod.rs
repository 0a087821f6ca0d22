//! Browser bindings: the mounted application, the DOM-backed view and the
//! page widgets.
//!
//! Only compiled for `wasm32`.

// wasm-bindgen expands to unsafe glue
#![allow(unsafe_code)]

mod store;
mod view;
mod widgets;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};
use xcommerce_core::{ProductMarkers, ToastKind};

pub use store::BrowserStore;
pub use view::DomView;

use crate::api::{CSRF_FIELD, StorefrontApi};
use crate::config::StorefrontConfig;
use crate::controller::PageController;
use crate::debounce::Debouncer;
use crate::error::{Result, UiError};
use crate::logging;
use crate::markers::{Action, ActionMap, STANDARD_MARKERS};
use crate::toast::TOAST_CLASS;

type Controller = PageController<DomView, BrowserStore>;
type SearchDebouncer = Debouncer<String, Timeout>;

/// A storefront page with its listeners attached.
///
/// Created with [`StorefrontApp::mount`]. Listeners stay registered until
/// [`StorefrontApp::dispose`] is called or the value is dropped.
#[wasm_bindgen]
pub struct StorefrontApp {
    controller: Rc<Controller>,
    listeners: Vec<EventListener>,
    search: Option<Rc<RefCell<SearchDebouncer>>>,
}

#[wasm_bindgen]
impl StorefrontApp {
    /// Attach the storefront behaviour to the current page.
    ///
    /// # Errors
    ///
    /// Fails if the page has no `<body>`, a configuration attribute is
    /// invalid, or the marker registry is inconsistent.
    pub fn mount() -> std::result::Result<StorefrontApp, JsError> {
        console_error_panic_hook::set_once();
        Self::try_mount().map_err(|e| JsError::new(&e.to_string()))
    }

    /// Remove every listener and cancel a pending search.
    pub fn dispose(&mut self) {
        if let Some(search) = self.search.take() {
            search.borrow_mut().cancel();
        }
        let count = self.listeners.len();
        self.listeners.clear();
        debug!(count, "Storefront listeners removed");
    }

    /// Show a toast. Unknown kinds are shown as info.
    pub fn notify(&self, message: &str, kind: &str) {
        self.controller.notify(message, ToastKind::parse(kind));
    }
}

impl StorefrontApp {
    fn try_mount() -> Result<Self> {
        let window = web_sys::window().ok_or(UiError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(UiError::MissingElement("document"))?;
        let body = document.body().ok_or(UiError::MissingElement("body"))?;
        let origin = window.location().origin().map_err(|e| js_error(&e))?;

        let dataset = body.dataset();
        let config = StorefrontConfig::from_page(&origin, |key| dataset.get(key))?;
        logging::init(&config);

        let actions = ActionMap::new(STANDARD_MARKERS)?;
        let api = StorefrontApi::new(config.api_base.clone(), csrf_token(&document))?;
        let view = DomView::new(document.clone(), config.clone());
        let store = BrowserStore::from_window(&window);

        let controller = Rc::new(PageController::new(config, api, view, store));
        controller.apply_saved_theme();

        let mut listeners = vec![click_listener(&document, actions, Rc::clone(&controller))];
        let search = search_input(&document).map(|input| {
            let debouncer = Rc::new(RefCell::new(Debouncer::new(
                controller.config().search_debounce,
            )));
            listeners.push(search_listener(&input, &debouncer, &controller));
            debouncer
        });

        listeners.extend(widgets::image_gallery(&document));
        listeners.extend(widgets::quantity_selectors(&document));
        listeners.extend(widgets::tooltips(&document));

        info!(
            api_base = %controller.config().api_base,
            listeners = listeners.len(),
            search = search.is_some(),
            "Storefront mounted"
        );

        Ok(Self {
            controller,
            listeners,
            search,
        })
    }
}

/// The delegated click listener for every marker action.
fn click_listener(
    document: &Document,
    actions: ActionMap,
    controller: Rc<Controller>,
) -> EventListener {
    EventListener::new(document, "click", move |event: &Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some((action, element)) =
            actions.resolve(|selector| target.closest(selector).ok().flatten())
        else {
            return;
        };

        match action {
            Action::ToggleMobileMenu => controller.toggle_mobile_menu(),
            Action::ToggleTheme => controller.toggle_theme(),
            Action::DismissToast => {
                if let Ok(Some(toast)) = element.closest(&format!(".{TOAST_CLASS}")) {
                    toast.remove();
                }
            }
            Action::AddToCart => {
                event.prevent_default();
                let Ok(button) = element.dyn_into::<HtmlElement>() else {
                    return;
                };
                let dataset = button.dataset();
                let markers = ProductMarkers {
                    product_id: dataset.get("productId"),
                    variant_id: dataset.get("variantId"),
                    quantity: dataset.get("quantity"),
                };
                let controller = Rc::clone(&controller);
                spawn_local(async move {
                    controller.add_to_cart(&button, &markers).await;
                });
            }
            Action::RemoveFromCart => {
                event.prevent_default();
                let Ok(button) = element.dyn_into::<HtmlElement>() else {
                    return;
                };
                let item_id = button.dataset().get("itemId");
                let controller = Rc::clone(&controller);
                spawn_local(async move {
                    controller
                        .remove_from_cart(&button, item_id.as_deref())
                        .await;
                });
            }
        }
    })
}

/// The debounced `input` listener on the search box.
fn search_listener(
    input: &HtmlInputElement,
    debouncer: &Rc<RefCell<SearchDebouncer>>,
    controller: &Rc<Controller>,
) -> EventListener {
    let field = input.clone();
    let debouncer = Rc::downgrade(debouncer);
    let controller = Rc::downgrade(controller);

    EventListener::new(input, "input", move |_event| {
        let Some(state) = debouncer.upgrade() else {
            return;
        };
        let fire = Weak::clone(&debouncer);
        let controller = Weak::clone(&controller);

        state.borrow_mut().call(field.value(), move |wait| {
            Timeout::new(millis(wait), move || {
                let Some(query) = fire.upgrade().and_then(|d| d.borrow_mut().take()) else {
                    return;
                };
                let Some(controller) = controller.upgrade() else {
                    return;
                };
                spawn_local(async move {
                    controller.handle_search(&query).await;
                });
            })
        });
    })
}

fn search_input(document: &Document) -> Option<HtmlInputElement> {
    document
        .query_selector("[data-search]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

/// The CSRF token rendered into the page, or empty when absent.
fn csrf_token(document: &Document) -> String {
    let token = document
        .query_selector(&format!("[name={CSRF_FIELD}]"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default();

    if token.is_empty() {
        warn!("No CSRF token on page; cart requests may be rejected");
    }
    token
}

/// Every element matching `selector`, in document order.
pub(super) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

pub(crate) fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

pub(crate) fn js_error(err: &JsValue) -> UiError {
    UiError::Dom(js_message(err))
}
