//! Light/dark theme preference.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The page colour theme.
///
/// Persisted in local storage under [`Theme::STORAGE_KEY`] as `"light"` or
/// `"dark"`, and applied as the `dark` class on the root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Local storage key holding the preference.
    pub const STORAGE_KEY: &'static str = "theme";

    /// Class toggled on the root element for the dark theme.
    pub const DARK_CLASS: &'static str = "dark";

    /// Parse a stored value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The theme currently shown, given whether the dark class is present.
    #[must_use]
    pub const fn from_dark_class(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
    }

    #[test]
    fn test_from_dark_class() {
        assert_eq!(Theme::from_dark_class(true), Theme::Dark);
        assert!(!Theme::from_dark_class(false).is_dark());
    }
}
