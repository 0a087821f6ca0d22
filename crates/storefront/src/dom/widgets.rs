//! Per-element listeners: image gallery, quantity steppers and tooltips.

use std::rc::Rc;

use gloo::events::EventListener;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, Event, HtmlElement, HtmlImageElement,
    HtmlInputElement,
};
use xcommerce_core::QuantityStepper;

use super::query_all;
use crate::gallery::{ACTIVE_THUMBNAIL_CLASSES, ImageSwap};
use crate::tooltip::{self, AnchorRect, TOOLTIP_CLASS, TOOLTIP_ID};

/// Event dispatched on a quantity input after every change.
pub const QUANTITY_CHANGE_EVENT: &str = "quantityChange";

// =============================================================================
// Image gallery
// =============================================================================

/// Thumbnail clicks swap the main product image.
pub fn image_gallery(document: &Document) -> Vec<EventListener> {
    let thumbnails = Rc::new(query_all(document, "[data-thumbnail]"));
    let main_image = document
        .query_selector("[data-main-image]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());

    thumbnails
        .iter()
        .map(|thumb| {
            let thumb_el = thumb.clone();
            let thumbnails = Rc::clone(&thumbnails);
            let main_image = main_image.clone();

            EventListener::new(thumb, "click", move |event: &Event| {
                event.prevent_default();
                let Some(main_image) = main_image.as_ref() else {
                    return;
                };
                let Some(swap) = ImageSwap::from_thumbnail(
                    thumb_el.get_attribute("data-full-image"),
                    thumb_el.get_attribute("data-alt"),
                ) else {
                    return;
                };

                main_image.set_src(&swap.src);
                main_image.set_alt(&swap.alt);

                for other in thumbnails.iter() {
                    for class in ACTIVE_THUMBNAIL_CLASSES {
                        let _ = other.class_list().remove_1(class);
                    }
                }
                for class in ACTIVE_THUMBNAIL_CLASSES {
                    let _ = thumb_el.class_list().add_1(class);
                }
            })
        })
        .collect()
}

// =============================================================================
// Quantity selectors
// =============================================================================

/// Wire the decrease/increase buttons and the input of every quantity
/// selector.
pub fn quantity_selectors(document: &Document) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    for selector in query_all(document, "[data-quantity-selector]") {
        let Some(input) = selector
            .query_selector("input")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            debug!("Quantity selector without an input");
            continue;
        };

        if let Ok(Some(button)) = selector.query_selector("[data-decrease]") {
            let input = input.clone();
            listeners.push(EventListener::new(&button, "click", move |_| {
                let stepper = stepper_for(&input);
                if let Some(quantity) = stepper.decrease(&input.value()) {
                    set_quantity(&input, quantity);
                }
            }));
        }

        if let Ok(Some(button)) = selector.query_selector("[data-increase]") {
            let input = input.clone();
            listeners.push(EventListener::new(&button, "click", move |_| {
                let stepper = stepper_for(&input);
                if let Some(quantity) = stepper.increase(&input.value()) {
                    set_quantity(&input, quantity);
                }
            }));
        }

        let field = input.clone();
        listeners.push(EventListener::new(&input, "change", move |_| {
            let quantity = stepper_for(&field).clamp(&field.value());
            set_quantity(&field, quantity);
        }));
    }

    listeners
}

/// Bounds for an input, re-read on every event so a changed `max` applies.
fn stepper_for(input: &HtmlInputElement) -> QuantityStepper {
    QuantityStepper::from_max_attribute(input.get_attribute("max").as_deref())
}

fn set_quantity(input: &HtmlInputElement, quantity: u32) {
    input.set_value(&quantity.to_string());

    let detail = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&detail, &"quantity".into(), &JsValue::from(quantity));
    let _ = js_sys::Reflect::set(&detail, &"input".into(), input);

    let init = CustomEventInit::new();
    init.set_detail(&detail);
    if let Ok(event) = CustomEvent::new_with_event_init_dict(QUANTITY_CHANGE_EVENT, &init) {
        let _ = input.dispatch_event(&event);
    }
}

// =============================================================================
// Tooltips
// =============================================================================

/// Show a tooltip above every `[data-tooltip]` element while hovered.
pub fn tooltips(document: &Document) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    for anchor in query_all(document, "[data-tooltip]") {
        let doc = document.clone();
        let el = anchor.clone();
        listeners.push(EventListener::new(&anchor, "mouseenter", move |_| {
            show_tooltip(&doc, &el);
        }));

        let doc = document.clone();
        listeners.push(EventListener::new(&anchor, "mouseleave", move |_| {
            hide_tooltip(&doc);
        }));
    }

    listeners
}

fn show_tooltip(document: &Document, anchor: &Element) {
    let (Some(body), Some(text)) = (document.body(), anchor.get_attribute("data-tooltip")) else {
        return;
    };
    hide_tooltip(document);

    let Some(tip) = document
        .create_element("div")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    tip.set_class_name(TOOLTIP_CLASS);
    tip.set_text_content(Some(&text));
    tip.set_id(TOOLTIP_ID);
    if body.append_child(&tip).is_err() {
        return;
    }

    let rect = anchor.get_bounding_client_rect();
    let (left, top) = tooltip::position(
        AnchorRect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
        },
        f64::from(tip.offset_width()),
        f64::from(tip.offset_height()),
    );

    let style = tip.style();
    let _ = style.set_property("left", &format!("{left}px"));
    let _ = style.set_property("top", &format!("{top}px"));
}

fn hide_tooltip(document: &Document) {
    if let Some(tip) = document.get_element_by_id(TOOLTIP_ID) {
        tip.remove();
    }
}
