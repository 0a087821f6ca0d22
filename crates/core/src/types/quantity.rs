//! Quantity parsing and stepping.
//!
//! Quantities reach the client as free-form attribute and input values. They
//! are read leniently: leading whitespace, an optional sign, then as many
//! digits as are present (`"3 items"` reads as 3). Anything unreadable falls
//! back to a default instead of surfacing an error.

/// Upper bound used when a quantity input carries no usable `max` attribute.
pub const DEFAULT_MAX_QUANTITY: u32 = 999;

/// Parse the leading integer of a string.
///
/// Returns `None` when no digits follow the optional sign.
///
/// ```
/// use xcommerce_core::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix(" 12abc"), Some(12));
/// assert_eq!(parse_int_prefix("-3"), Some(-3));
/// assert_eq!(parse_int_prefix("abc"), None);
/// ```
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, s.get(1..)?),
        Some(b'+') => (false, s.get(1..)?),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits.get(..end)?.parse().ok()?;

    Some(if negative { -value } else { value })
}

/// Read a positive quantity, falling back to 1.
///
/// Missing, unparseable, zero and negative values all read as 1.
#[must_use]
pub fn parse_quantity(raw: Option<&str>) -> u32 {
    raw.and_then(parse_int_prefix)
        .and_then(|q| u32::try_from(q).ok())
        .filter(|q| *q > 0)
        .unwrap_or(1)
}

/// Increase/decrease logic for a quantity input bounded to `[1, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    max: u32,
}

impl QuantityStepper {
    /// Create a stepper with an explicit upper bound (at least 1).
    #[must_use]
    pub fn new(max: u32) -> Self {
        Self { max: max.max(1) }
    }

    /// Create a stepper from an input's `max` attribute.
    ///
    /// An absent, unparseable or non-positive attribute yields
    /// [`DEFAULT_MAX_QUANTITY`].
    #[must_use]
    pub fn from_max_attribute(raw: Option<&str>) -> Self {
        let max = raw
            .and_then(parse_int_prefix)
            .and_then(|m| u32::try_from(m).ok())
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_MAX_QUANTITY);
        Self::new(max)
    }

    /// The upper bound.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Clamp a raw input value into `[1, max]`.
    #[must_use]
    pub fn clamp(&self, raw: &str) -> u32 {
        parse_int_prefix(raw).map_or(1, |v| {
            let bounded = v.clamp(1, i64::from(self.max));
            u32::try_from(bounded).unwrap_or(1)
        })
    }

    /// Value after a decrease click, or `None` when already at 1.
    #[must_use]
    pub fn decrease(&self, raw: &str) -> Option<u32> {
        let current = self.clamp(raw);
        (current > 1).then(|| current - 1)
    }

    /// Value after an increase click, or `None` when already at `max`.
    #[must_use]
    pub fn increase(&self, raw: &str) -> Option<u32> {
        let current = self.clamp(raw);
        (current < self.max).then(|| current + 1)
    }
}
