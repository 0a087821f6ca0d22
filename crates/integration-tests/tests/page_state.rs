//! Integration tests for the synchronous page handlers: theme, mobile menu
//! and notifications.

use xcommerce_core::{Theme, ToastKind};
use xcommerce_integration_tests::{
    RecordingView, ViewEvent, controller, controller_with_store, unreachable_origin,
};
use xcommerce_storefront::toast::Toast;
use xcommerce_storefront::view::{MemoryStore, PreferenceStore};

fn store_with(theme: &str) -> MemoryStore {
    let store = MemoryStore::new();
    store.save(Theme::STORAGE_KEY, theme).unwrap();
    store
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn test_toggle_theme_twice() {
    let page = controller(&unreachable_origin(), RecordingView::new());

    page.toggle_theme();
    assert!(page.view().events().contains(&ViewEvent::Dark(true)));
    assert_eq!(page.store().load(Theme::STORAGE_KEY).as_deref(), Some("dark"));

    page.toggle_theme();
    assert_eq!(
        page.view().events(),
        vec![ViewEvent::Dark(true), ViewEvent::Dark(false)]
    );
    assert_eq!(page.store().load(Theme::STORAGE_KEY).as_deref(), Some("light"));
}

#[test]
fn test_toggle_theme_from_dark_markup() {
    let page = controller(&unreachable_origin(), RecordingView::dark());

    page.toggle_theme();

    assert_eq!(page.view().events(), vec![ViewEvent::Dark(false)]);
    assert_eq!(page.store().load(Theme::STORAGE_KEY).as_deref(), Some("light"));
}

#[test]
fn test_apply_saved_theme() {
    let page = controller_with_store(
        &unreachable_origin(),
        RecordingView::new(),
        store_with("dark"),
    );
    page.apply_saved_theme();
    assert_eq!(page.view().events(), vec![ViewEvent::Dark(true)]);

    let page = controller_with_store(
        &unreachable_origin(),
        RecordingView::dark(),
        store_with("light"),
    );
    page.apply_saved_theme();
    assert_eq!(page.view().events(), vec![ViewEvent::Dark(false)]);
}

#[test]
fn test_apply_saved_theme_ignores_missing_or_unknown() {
    let page = controller(&unreachable_origin(), RecordingView::new());
    page.apply_saved_theme();
    assert!(page.view().events().is_empty());

    let page = controller_with_store(
        &unreachable_origin(),
        RecordingView::dark(),
        store_with("sepia"),
    );
    page.apply_saved_theme();
    assert!(page.view().events().is_empty());
}

// =============================================================================
// Mobile menu
// =============================================================================

#[test]
fn test_toggle_mobile_menu() {
    let page = controller(&unreachable_origin(), RecordingView::new());

    page.toggle_mobile_menu();
    page.toggle_mobile_menu();

    assert_eq!(
        page.view().events(),
        vec![ViewEvent::MobileMenuToggled, ViewEvent::MobileMenuToggled]
    );
}

// =============================================================================
// Notifications
// =============================================================================

#[test]
fn test_notify_kinds() {
    let page = controller(&unreachable_origin(), RecordingView::new());

    page.notify("Saved", ToastKind::Success);
    page.notify("Heads up", ToastKind::parse("warning"));
    page.notify("Hello", ToastKind::parse("sparkly"));

    assert_eq!(
        page.view().toasts(),
        vec![
            Toast::success("Saved"),
            Toast::new("Heads up", ToastKind::Warning),
            Toast::new("Hello", ToastKind::Info),
        ]
    );
}
