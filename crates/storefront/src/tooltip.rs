//! Tooltip placement.

/// Id given to the tooltip element while it is shown.
pub const TOOLTIP_ID: &str = "tooltip";

/// Class attribute of the tooltip element.
pub const TOOLTIP_CLASS: &str = "absolute z-50 px-2 py-1 text-sm text-white bg-gray-900 rounded shadow-lg";

/// Vertical gap between the tooltip and its anchor, in CSS pixels.
pub const GAP_PX: f64 = 5.0;

/// Bounding box of the element a tooltip is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
}

/// Top-left position for a tooltip of the given size, centred above `anchor`.
#[must_use]
pub fn position(anchor: AnchorRect, width: f64, height: f64) -> (f64, f64) {
    let left = anchor.left + anchor.width / 2.0 - width / 2.0;
    let top = anchor.top - height - GAP_PX;
    (left, top)
}
