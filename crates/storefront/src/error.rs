//! Unified error handling for the storefront client.
//!
//! Every handler failure ends as a `UiError`. Handlers never propagate an
//! error past themselves: they log it and, where the action was user-initiated,
//! turn it into a toast via [`UiError::user_message`], which keeps transport
//! details out of the page.

use thiserror::Error;
use xcommerce_core::IdError;

use crate::config::ConfigError;
use crate::markers::MarkerError;

/// Toast text for failures that carry no server message.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Client-level error type for the storefront.
#[derive(Debug, Error)]
pub enum UiError {
    /// The request never produced a usable response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error: {status}{}", detail(.message))]
    Api { status: u16, message: Option<String> },

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A marker attribute held an unusable id.
    #[error("Invalid marker: {0}")]
    Id(#[from] IdError),

    /// The marker registry is inconsistent.
    #[error("Marker error: {0}")]
    Marker(#[from] MarkerError),

    /// Page configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// An element the action depends on is not on the page.
    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    /// Local storage rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A browser API call failed.
    #[error("DOM error: {0}")]
    Dom(String),
}

impl UiError {
    /// Text shown to the user for this error.
    ///
    /// Server-provided messages are shown as-is. Non-success responses
    /// without a message show `fallback`; every other failure shows
    /// [`GENERIC_FAILURE`].
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Api { message: None, .. } | Self::Id(_) => fallback.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" - {m}"))
        .unwrap_or_default()
}

/// Result type alias for `UiError`.
pub type Result<T> = std::result::Result<T, UiError>;
