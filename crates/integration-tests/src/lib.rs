//! Integration test support for the xCommerce storefront client.
//!
//! The controller is driven natively: HTTP goes to a [`MockStorefront`]
//! (an `axum` server on an ephemeral port) and page updates land in a
//! [`RecordingView`] instead of the DOM.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p xcommerce-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use xcommerce_core::{CartBadge, CartLine, Price};
use xcommerce_storefront::api::StorefrontApi;
use xcommerce_storefront::config::StorefrontConfig;
use xcommerce_storefront::controller::PageController;
use xcommerce_storefront::toast::Toast;
use xcommerce_storefront::view::{MemoryStore, PageView};

/// CSRF token the test controllers send.
pub const CSRF_TOKEN: &str = "test-csrf-token";

// =============================================================================
// Mock storefront server
// =============================================================================

/// A request received by the mock server.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: &'static str,
    pub path: String,
    pub query: Option<String>,
    pub csrf_token: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Duration,
}

impl Canned {
    fn json(status: StatusCode, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    async fn respond(self) -> impl IntoResponse {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
    }
}

#[derive(Debug)]
struct MockState {
    hits: Mutex<Vec<Hit>>,
    add: Mutex<Canned>,
    remove: Mutex<Canned>,
    search: Mutex<HashMap<String, Canned>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn csrf(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-csrftoken")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn add_to_cart(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    tracing::debug!(%body, "mock: add to cart");
    lock(&state.hits).push(Hit {
        method: "POST",
        path: "/api/cart/add/".to_string(),
        query: None,
        csrf_token: csrf(&headers),
        body: Some(body),
    });
    let canned = lock(&state.add).clone();
    canned.respond().await
}

async fn remove_from_cart(
    State(state): State<Arc<MockState>>,
    Path(item_id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    lock(&state.hits).push(Hit {
        method: "DELETE",
        path: format!("/api/cart/remove/{item_id}/"),
        query: None,
        csrf_token: csrf(&headers),
        body: None,
    });
    let canned = lock(&state.remove).clone();
    canned.respond().await
}

async fn search(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let query = params.get("q").cloned().unwrap_or_default();
    lock(&state.hits).push(Hit {
        method: "GET",
        path: "/api/search/".to_string(),
        query: Some(query.clone()),
        csrf_token: csrf(&headers),
        body: None,
    });
    let canned = lock(&state.search)
        .get(&query)
        .cloned()
        .unwrap_or_else(|| Canned::json(StatusCode::OK, &json!({ "results": [] })));
    canned.respond().await
}

/// In-process storefront API with canned responses.
///
/// The server task is aborted when the value is dropped.
pub struct MockStorefront {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockStorefront {
    /// Start a server on an ephemeral port.
    ///
    /// Cart calls succeed with an empty cart until told otherwise; searches
    /// return no results.
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            hits: Mutex::new(Vec::new()),
            add: Mutex::new(Canned::json(
                StatusCode::OK,
                &json!({ "success": true, "cart_count": 0 }),
            )),
            remove: Mutex::new(Canned::json(StatusCode::OK, &json!({ "success": true }))),
            search: Mutex::new(HashMap::new()),
        });

        let app = Router::new()
            .route("/api/cart/add/", post(add_to_cart))
            .route("/api/cart/remove/{item_id}/", delete(remove_from_cart))
            .route("/api/search/", get(search))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock storefront");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock storefront stopped");
            }
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Origin the controller should treat as the page origin.
    #[must_use]
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Respond to add-to-cart with `status` and a JSON body.
    pub fn respond_to_add(&self, status: u16, body: &Value) {
        *lock(&self.state.add) = Canned::json(status_code(status), body);
    }

    /// Respond to add-to-cart with `status` and a raw body.
    pub fn respond_to_add_raw(&self, status: u16, body: &str) {
        *lock(&self.state.add) = Canned {
            status: status_code(status),
            body: body.to_string(),
            delay: Duration::ZERO,
        };
    }

    /// Respond to remove-from-cart with `status`.
    pub fn respond_to_remove(&self, status: u16) {
        *lock(&self.state.remove) = Canned::json(status_code(status), &json!({}));
    }

    /// Respond to a search for `query` with `results` after `delay`.
    pub fn respond_to_search(&self, query: &str, results: &Value, delay: Duration) {
        let mut canned = Canned::json(StatusCode::OK, &json!({ "results": results }));
        canned.delay = delay;
        lock(&self.state.search).insert(query.to_string(), canned);
    }

    /// Respond to a search for `query` with `body` as the whole payload.
    pub fn respond_to_search_raw(&self, query: &str, body: &Value) {
        lock(&self.state.search).insert(query.to_string(), Canned::json(StatusCode::OK, body));
    }

    /// Fail searches for `query` with `status`.
    pub fn fail_search(&self, query: &str, status: u16) {
        lock(&self.state.search).insert(
            query.to_string(),
            Canned::json(status_code(status), &json!({ "error": "boom" })),
        );
    }

    /// Every request received so far.
    #[must_use]
    pub fn hits(&self) -> Vec<Hit> {
        lock(&self.state.hits).clone()
    }

    /// Search queries received so far, in arrival order.
    #[must_use]
    pub fn search_queries(&self) -> Vec<String> {
        self.hits()
            .into_iter()
            .filter_map(|hit| hit.query)
            .collect()
    }
}

impl Drop for MockStorefront {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).expect("Invalid status code")
}

/// An origin nothing listens on.
#[must_use]
pub fn unreachable_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// =============================================================================
// Recording view
// =============================================================================

/// Stand-in for a button element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestButton {
    pub id: String,
    /// `data-item-id` of the cart line the button sits in
    pub item_id: Option<String>,
}

impl TestButton {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            item_id: None,
        }
    }

    #[must_use]
    pub fn in_cart_item(id: &str, item_id: &str) -> Self {
        Self {
            id: id.to_string(),
            item_id: Some(item_id.to_string()),
        }
    }
}

/// Page update recorded by [`RecordingView`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    MobileMenuToggled,
    Loading { button: String, on: bool },
    Added { button: String },
    Badge(CartBadge),
    ItemRemoved { button: String },
    Total(String),
    Dark(bool),
    SearchShown(String),
    SearchCleared,
    Toast(Toast),
}

#[derive(Debug, Default)]
struct Page {
    events: Vec<ViewEvent>,
    /// Cart lines keyed by item id
    lines: Vec<(String, CartLine)>,
    dark: bool,
    search_html: Option<String>,
    search_visible: bool,
}

/// [`PageView`] that records every update.
#[derive(Debug, Default)]
pub struct RecordingView {
    page: Mutex<Page>,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A page whose cart holds `lines` of `(item id, price, quantity)`.
    #[must_use]
    pub fn with_cart(lines: &[(&str, &str, &str)]) -> Self {
        let view = Self::default();
        lock(&view.page).lines = lines
            .iter()
            .map(|(id, price, quantity)| {
                (
                    (*id).to_string(),
                    CartLine::from_attributes(Some(*price), Some(*quantity)),
                )
            })
            .collect();
        view
    }

    /// A page rendered with the dark class already set.
    #[must_use]
    pub fn dark() -> Self {
        let view = Self::default();
        lock(&view.page).dark = true;
        view
    }

    #[must_use]
    pub fn events(&self) -> Vec<ViewEvent> {
        lock(&self.page).events.clone()
    }

    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Toast(toast) => Some(toast),
                _ => None,
            })
            .collect()
    }

    /// The last badge shown, if any.
    #[must_use]
    pub fn badge(&self) -> Option<CartBadge> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Badge(badge) => Some(badge),
            _ => None,
        })
    }

    /// The last total shown, if any.
    #[must_use]
    pub fn total(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Total(total) => Some(total),
            _ => None,
        })
    }

    /// Whether any button is still in its loading state.
    #[must_use]
    pub fn any_loading(&self) -> bool {
        let mut loading: HashMap<String, bool> = HashMap::new();
        for event in self.events() {
            if let ViewEvent::Loading { button, on } = event {
                loading.insert(button, on);
            }
        }
        loading.values().any(|on| *on)
    }

    #[must_use]
    pub fn remaining_items(&self) -> Vec<String> {
        lock(&self.page)
            .lines
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    #[must_use]
    pub fn search_html(&self) -> Option<String> {
        lock(&self.page).search_html.clone()
    }

    #[must_use]
    pub fn search_visible(&self) -> bool {
        lock(&self.page).search_visible
    }

    fn record(&self, event: ViewEvent) {
        lock(&self.page).events.push(event);
    }
}

impl PageView for RecordingView {
    type Element = TestButton;

    fn toggle_mobile_menu(&self) {
        self.record(ViewEvent::MobileMenuToggled);
    }

    fn set_loading(&self, button: &TestButton, loading: bool) {
        self.record(ViewEvent::Loading {
            button: button.id.clone(),
            on: loading,
        });
    }

    fn show_added(&self, button: &TestButton) {
        self.record(ViewEvent::Added {
            button: button.id.clone(),
        });
    }

    fn set_cart_badge(&self, badge: &CartBadge) {
        self.record(ViewEvent::Badge(badge.clone()));
    }

    fn remove_cart_item(&self, button: &TestButton) {
        let mut page = lock(&self.page);
        if let Some(item_id) = &button.item_id {
            page.lines.retain(|(id, _)| id != item_id);
        }
        page.events.push(ViewEvent::ItemRemoved {
            button: button.id.clone(),
        });
    }

    fn cart_lines(&self) -> Vec<CartLine> {
        lock(&self.page)
            .lines
            .iter()
            .map(|(_, line)| *line)
            .collect()
    }

    fn set_cart_total(&self, total: &Price) {
        self.record(ViewEvent::Total(total.display()));
    }

    fn is_dark(&self) -> bool {
        lock(&self.page).dark
    }

    fn set_dark(&self, dark: bool) {
        let mut page = lock(&self.page);
        page.dark = dark;
        page.events.push(ViewEvent::Dark(dark));
    }

    fn show_search_results(&self, html: &str) {
        let mut page = lock(&self.page);
        page.search_html = Some(html.to_string());
        page.search_visible = true;
        page.events.push(ViewEvent::SearchShown(html.to_string()));
    }

    fn clear_search_results(&self) {
        let mut page = lock(&self.page);
        page.search_html = None;
        page.search_visible = false;
        page.events.push(ViewEvent::SearchCleared);
    }

    fn show_toast(&self, toast: &Toast) {
        self.record(ViewEvent::Toast(toast.clone()));
    }
}

// =============================================================================
// Controller setup
// =============================================================================

/// Test controller type.
pub type TestController = PageController<RecordingView, MemoryStore>;

/// A controller whose API calls go to `origin`.
#[must_use]
pub fn controller(origin: &str, view: RecordingView) -> TestController {
    controller_with_store(origin, view, MemoryStore::new())
}

/// A controller with a pre-filled preference store.
#[must_use]
pub fn controller_with_store(
    origin: &str,
    view: RecordingView,
    store: MemoryStore,
) -> TestController {
    let config = StorefrontConfig::for_origin(origin).expect("Invalid test origin");
    let api = StorefrontApi::new(config.api_base.clone(), CSRF_TOKEN)
        .expect("Failed to build API client");
    PageController::new(config, api, view, store)
}
