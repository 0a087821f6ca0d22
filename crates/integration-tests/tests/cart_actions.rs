//! Integration tests for the add-to-cart and remove-from-cart flows.

use serde_json::json;
use xcommerce_core::{CartBadge, ProductMarkers};
use xcommerce_integration_tests::{
    CSRF_TOKEN, MockStorefront, RecordingView, TestButton, ViewEvent, controller,
    unreachable_origin,
};
use xcommerce_storefront::toast::Toast;

fn markers(product: &str, variant: Option<&str>, quantity: Option<&str>) -> ProductMarkers {
    ProductMarkers {
        product_id: Some(product.to_string()),
        variant_id: variant.map(String::from),
        quantity: quantity.map(String::from),
    }
}

// =============================================================================
// Add to cart
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_success_updates_badge() {
    let server = MockStorefront::start().await;
    server.respond_to_add(200, &json!({ "success": true, "cart_count": 3 }));
    let page = controller(&server.origin(), RecordingView::new());
    let button = TestButton::new("add-7");

    page.add_to_cart(&button, &markers("7", Some("11"), Some("2")))
        .await;

    let view = page.view();
    assert_eq!(
        view.badge(),
        Some(CartBadge {
            text: "3".to_string(),
            hidden: false,
        })
    );
    assert_eq!(view.toasts(), vec![Toast::success("Product added to cart")]);
    assert!(!view.any_loading());

    let hits = server.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].method, "POST");
    assert_eq!(hits[0].csrf_token.as_deref(), Some(CSRF_TOKEN));
    assert_eq!(
        hits[0].body,
        Some(json!({ "product_id": 7, "variant_id": 11, "quantity": 2 }))
    );
}

#[tokio::test]
async fn test_add_to_cart_refreshes_total_from_subtotal() {
    let server = MockStorefront::start().await;
    server.respond_to_add(200, &json!({ "cart_count": 2, "cart_subtotal": "42.5" }));
    let page = controller(&server.origin(), RecordingView::new());

    page.add_to_cart(&TestButton::new("add-3"), &markers("3", None, Some("2")))
        .await;

    assert_eq!(page.view().total().as_deref(), Some("$42.50"));
    assert_eq!(
        page.view().toasts(),
        vec![Toast::success("Product added to cart")]
    );
}

#[tokio::test]
async fn test_add_to_cart_without_subtotal_keeps_total() {
    let server = MockStorefront::start().await;
    server.respond_to_add(200, &json!({ "cart_count": 2 }));
    let page = controller(&server.origin(), RecordingView::new());

    page.add_to_cart(&TestButton::new("add-3"), &markers("3", None, None))
        .await;

    assert_eq!(page.view().total(), None);
}

#[tokio::test]
async fn test_add_to_cart_clears_loading_before_added_label() {
    let server = MockStorefront::start().await;
    server.respond_to_add(200, &json!({ "cart_count": 1 }));
    let page = controller(&server.origin(), RecordingView::new());
    let button = TestButton::new("add-1");

    page.add_to_cart(&button, &markers("1", None, None)).await;

    let events = page.view().events();
    let loading_off = events
        .iter()
        .position(|e| {
            *e == ViewEvent::Loading {
                button: "add-1".to_string(),
                on: false,
            }
        })
        .unwrap();
    let added = events
        .iter()
        .position(|e| {
            *e == ViewEvent::Added {
                button: "add-1".to_string(),
            }
        })
        .unwrap();
    assert_eq!(
        events[0],
        ViewEvent::Loading {
            button: "add-1".to_string(),
            on: true,
        }
    );
    assert!(loading_off < added);
}

#[tokio::test]
async fn test_add_to_cart_defaults() {
    let server = MockStorefront::start().await;
    let page = controller(&server.origin(), RecordingView::new());

    page.add_to_cart(&TestButton::new("add"), &markers("5", Some(""), Some("zero")))
        .await;

    assert_eq!(
        server.hits()[0].body,
        Some(json!({ "product_id": 5, "variant_id": null, "quantity": 1 }))
    );
    // Default mock cart is empty
    assert_eq!(
        page.view().badge(),
        Some(CartBadge {
            text: "0".to_string(),
            hidden: true,
        })
    );
}

#[tokio::test]
async fn test_add_to_cart_failure_shows_server_error() {
    let server = MockStorefront::start().await;
    server.respond_to_add(400, &json!({ "error": "Out of stock" }));
    let page = controller(&server.origin(), RecordingView::new());

    page.add_to_cart(&TestButton::new("add-7"), &markers("7", None, Some("1")))
        .await;

    let view = page.view();
    assert_eq!(view.toasts(), vec![Toast::error("Out of stock")]);
    assert!(!view.any_loading());
    assert_eq!(view.badge(), None);
    assert!(
        !view
            .events()
            .iter()
            .any(|e| matches!(e, ViewEvent::Added { .. }))
    );
}

#[tokio::test]
async fn test_add_to_cart_failure_uses_message_field() {
    let server = MockStorefront::start().await;
    server.respond_to_add(404, &json!({ "success": false, "message": "Product not found" }));
    let page = controller(&server.origin(), RecordingView::new());

    page.add_to_cart(&TestButton::new("add"), &markers("99", None, None))
        .await;

    assert_eq!(page.view().toasts(), vec![Toast::error("Product not found")]);
}

#[tokio::test]
async fn test_add_to_cart_failure_without_message_uses_fallback() {
    let server = MockStorefront::start().await;
    server.respond_to_add_raw(500, "<html>Internal Server Error</html>");
    let page = controller(&server.origin(), RecordingView::new());

    page.add_to_cart(&TestButton::new("add"), &markers("7", None, None))
        .await;

    assert_eq!(
        page.view().toasts(),
        vec![Toast::error("Failed to add product to cart")]
    );
    assert!(!page.view().any_loading());
}

#[tokio::test]
async fn test_add_to_cart_network_failure_is_generic() {
    let page = controller(&unreachable_origin(), RecordingView::new());

    page.add_to_cart(&TestButton::new("add"), &markers("7", None, None))
        .await;

    assert_eq!(page.view().toasts(), vec![Toast::error("Something went wrong")]);
    assert!(!page.view().any_loading());
}

#[tokio::test]
async fn test_add_to_cart_invalid_product_id_sends_nothing() {
    let server = MockStorefront::start().await;
    let page = controller(&server.origin(), RecordingView::new());

    page.add_to_cart(&TestButton::new("add"), &markers("abc", None, None))
        .await;
    page.add_to_cart(&TestButton::new("add"), &ProductMarkers::default())
        .await;

    assert!(server.hits().is_empty());
    assert_eq!(
        page.view().toasts(),
        vec![
            Toast::error("Failed to add product to cart"),
            Toast::error("Failed to add product to cart"),
        ]
    );
    assert!(
        !page
            .view()
            .events()
            .iter()
            .any(|e| matches!(e, ViewEvent::Loading { .. }))
    );
}

// =============================================================================
// Remove from cart
// =============================================================================

#[tokio::test]
async fn test_remove_from_cart_updates_totals() {
    let server = MockStorefront::start().await;
    let view = RecordingView::with_cart(&[("1", "10.00", "2"), ("2", "5.50", "1")]);
    let page = controller(&server.origin(), view);

    page.remove_from_cart(&TestButton::in_cart_item("remove-1", "1"), Some("1"))
        .await;

    let view = page.view();
    assert_eq!(view.remaining_items(), vec!["2".to_string()]);
    assert_eq!(view.total().as_deref(), Some("$5.50"));
    assert_eq!(view.toasts(), vec![Toast::success("Item removed from cart")]);

    let hits = server.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].method, "DELETE");
    assert_eq!(hits[0].path, "/api/cart/remove/1/");
    assert_eq!(hits[0].csrf_token.as_deref(), Some(CSRF_TOKEN));
}

#[tokio::test]
async fn test_remove_last_item_totals_zero() {
    let server = MockStorefront::start().await;
    let page = controller(
        &server.origin(),
        RecordingView::with_cart(&[("4", "19.99", "3")]),
    );

    page.remove_from_cart(&TestButton::in_cart_item("remove-4", "4"), Some("4"))
        .await;

    assert!(page.view().remaining_items().is_empty());
    assert_eq!(page.view().total().as_deref(), Some("$0.00"));
}

#[tokio::test]
async fn test_remove_with_overflowing_total_keeps_displayed_total() {
    let server = MockStorefront::start().await;
    let page = controller(
        &server.origin(),
        RecordingView::with_cart(&[
            ("1", "10.00", "1"),
            ("2", "79228162514264337593543950335", "2"),
        ]),
    );

    page.remove_from_cart(&TestButton::in_cart_item("remove-1", "1"), Some("1"))
        .await;

    let view = page.view();
    assert_eq!(view.remaining_items(), vec!["2".to_string()]);
    assert_eq!(view.total(), None);
    assert_eq!(view.toasts(), vec![Toast::success("Item removed from cart")]);
}

#[tokio::test]
async fn test_remove_from_cart_failure_keeps_item() {
    let server = MockStorefront::start().await;
    server.respond_to_remove(404);
    let page = controller(
        &server.origin(),
        RecordingView::with_cart(&[("1", "10.00", "2")]),
    );

    page.remove_from_cart(&TestButton::in_cart_item("remove-1", "1"), Some("1"))
        .await;

    let view = page.view();
    assert_eq!(view.remaining_items(), vec!["1".to_string()]);
    assert_eq!(view.total(), None);
    assert_eq!(view.toasts(), vec![Toast::error("Failed to remove item")]);
}

#[tokio::test]
async fn test_remove_from_cart_network_failure() {
    let page = controller(
        &unreachable_origin(),
        RecordingView::with_cart(&[("1", "10.00", "2")]),
    );

    page.remove_from_cart(&TestButton::in_cart_item("remove-1", "1"), Some("1"))
        .await;

    assert_eq!(page.view().toasts(), vec![Toast::error("Failed to remove item")]);
    assert_eq!(page.view().remaining_items(), vec!["1".to_string()]);
}

#[tokio::test]
async fn test_remove_from_cart_without_item_id_sends_nothing() {
    let server = MockStorefront::start().await;
    let page = controller(&server.origin(), RecordingView::new());

    page.remove_from_cart(&TestButton::new("remove"), None).await;
    page.remove_from_cart(&TestButton::new("remove"), Some("x1"))
        .await;

    assert!(server.hits().is_empty());
    assert_eq!(
        page.view().toasts(),
        vec![
            Toast::error("Failed to remove item"),
            Toast::error("Failed to remove item"),
        ]
    );
}
