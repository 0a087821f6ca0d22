//! Toast notification kinds.

use serde::{Deserialize, Serialize};

/// Severity of a toast notification, which selects its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    /// Parse a kind name. Unknown names fall back to [`ToastKind::Info`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Background colour class for the toast element.
    #[must_use]
    pub const fn color_class(self) -> &'static str {
        match self {
            Self::Success => "bg-green-500",
            Self::Error => "bg-red-500",
            Self::Warning => "bg-yellow-500",
            Self::Info => "bg-blue-500",
        }
    }
}
