//! Marker attributes that bind page markup to controller actions.
//!
//! Clicks are handled by one delegated listener. The clicked element (or its
//! nearest ancestor) carrying one of the registered marker attributes decides
//! which action runs. The registry is checked when the page is mounted, so a
//! typo in a marker name fails loudly instead of silently never matching.

use thiserror::Error;

/// A click action triggered by a marker attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleMobileMenu,
    AddToCart,
    RemoveFromCart,
    ToggleTheme,
    DismissToast,
}

/// The stock marker attributes used by the storefront templates.
pub const STANDARD_MARKERS: &[(&str, Action)] = &[
    ("data-mobile-menu-toggle", Action::ToggleMobileMenu),
    ("data-add-to-cart", Action::AddToCart),
    ("data-remove-from-cart", Action::RemoveFromCart),
    ("data-theme-toggle", Action::ToggleTheme),
    ("data-toast-dismiss", Action::DismissToast),
];

/// Errors found while validating a marker registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("marker {0:?} is not a data- attribute")]
    NotDataAttribute(String),
    #[error("marker {0:?} is bound more than once")]
    Duplicate(String),
}

#[derive(Debug, Clone)]
struct Binding {
    selector: String,
    action: Action,
}

/// Validated mapping from marker attribute to [`Action`].
#[derive(Debug, Clone)]
pub struct ActionMap {
    bindings: Vec<Binding>,
}

impl ActionMap {
    /// Build and validate a registry.
    ///
    /// Bindings are tried in the given order when resolving a click.
    ///
    /// # Errors
    ///
    /// Returns `MarkerError` if an attribute does not start with `data-`,
    /// contains characters outside `[a-z0-9-]`, or is bound twice.
    pub fn new<'a, I>(markers: I) -> Result<Self, MarkerError>
    where
        I: IntoIterator<Item = &'a (&'a str, Action)>,
    {
        let mut bindings: Vec<Binding> = Vec::new();

        for &(attribute, action) in markers {
            let valid = attribute
                .strip_prefix("data-")
                .is_some_and(|rest| {
                    !rest.is_empty()
                        && rest
                            .chars()
                            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                });
            if !valid {
                return Err(MarkerError::NotDataAttribute(attribute.to_string()));
            }

            let selector = format!("[{attribute}]");
            if bindings.iter().any(|b| b.selector == selector) {
                return Err(MarkerError::Duplicate(attribute.to_string()));
            }
            bindings.push(Binding { selector, action });
        }

        Ok(Self { bindings })
    }

    /// Resolve a click to the first matching action.
    ///
    /// `closest` is called with each binding's CSS selector and returns the
    /// matching element, if any (the browser binding uses `Element::closest`).
    pub fn resolve<E, F>(&self, mut closest: F) -> Option<(Action, E)>
    where
        F: FnMut(&str) -> Option<E>,
    {
        self.bindings
            .iter()
            .find_map(|b| closest(&b.selector).map(|el| (b.action, el)))
    }

    /// CSS selectors of every binding, in resolution order.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.selector.as_str())
    }
}
