//! Cart line items as rendered on the page.
//!
//! The page markup is the source of truth for the cart: each line carries its
//! unit price and quantity in attributes, and totals are recomputed from
//! whatever lines are still present.

use core::str::FromStr;

use rust_decimal::Decimal;

use super::quantity::parse_int_prefix;

/// A cart line read back from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartLine {
    /// Unit price.
    pub price: Decimal,
    /// Quantity in the cart.
    pub quantity: u32,
}

impl CartLine {
    /// Create a cart line.
    #[must_use]
    pub const fn new(price: Decimal, quantity: u32) -> Self {
        Self { price, quantity }
    }

    /// Read a line from its raw price and quantity attributes.
    ///
    /// Unreadable prices count as 0, unreadable or negative quantities as 0.
    #[must_use]
    pub fn from_attributes(price: Option<&str>, quantity: Option<&str>) -> Self {
        let price = price
            .map(str::trim)
            .and_then(|p| Decimal::from_str(p).ok())
            .unwrap_or_default();
        let quantity = quantity
            .and_then(parse_int_prefix)
            .and_then(|q| u32::try_from(q).ok())
            .unwrap_or(0);
        Self { price, quantity }
    }

    /// Price times quantity, or `None` if the product overflows.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Sum of all line totals, or `None` if any line or the sum overflows.
#[must_use]
pub fn cart_total(lines: &[CartLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.line_total()?))
}

/// Display state of the header cart-count badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartBadge {
    /// Badge text.
    pub text: String,
    /// Whether the badge is hidden. An empty cart hides the badge.
    pub hidden: bool,
}

impl CartBadge {
    /// Badge state for a cart holding `count` items.
    #[must_use]
    pub fn from_count(count: u32) -> Self {
        Self {
            text: count.to_string(),
            hidden: count == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attributes() {
        let line = CartLine::from_attributes(Some("19.99"), Some("2"));
        assert_eq!(line, CartLine::new(Decimal::new(1999, 2), 2));
    }

    #[test]
    fn test_from_attributes_defaults_to_zero() {
        let line = CartLine::from_attributes(Some("free"), None);
        assert_eq!(line, CartLine::default());

        let line = CartLine::from_attributes(None, Some("-1"));
        assert_eq!(line.quantity, 0);
    }

    #[test]
    fn test_cart_total() {
        let lines = [
            CartLine::new(Decimal::new(1000, 2), 2),
            CartLine::new(Decimal::new(550, 2), 1),
            CartLine::new(Decimal::new(9999, 2), 0),
        ];
        assert_eq!(cart_total(&lines), Some(Decimal::new(2550, 2)));
        assert_eq!(cart_total(&[]), Some(Decimal::ZERO));
    }

    #[test]
    fn test_cart_total_overflow_is_none() {
        let huge = CartLine::from_attributes(Some("79228162514264337593543950335"), Some("2"));
        assert_eq!(huge.line_total(), None);
        assert_eq!(cart_total(&[huge]), None);

        let max = CartLine::new(Decimal::MAX, 1);
        assert_eq!(max.line_total(), Some(Decimal::MAX));
        assert_eq!(cart_total(&[max, CartLine::new(Decimal::ONE, 1)]), None);
    }

    #[test]
    fn test_badge_hidden_when_empty() {
        assert_eq!(
            CartBadge::from_count(0),
            CartBadge {
                text: "0".to_string(),
                hidden: true
            }
        );
        assert!(!CartBadge::from_count(3).hidden);
    }
}
