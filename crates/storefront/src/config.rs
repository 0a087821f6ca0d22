//! Storefront client configuration read from the page.
//!
//! The browser has no process environment, so overrides come from `data-*`
//! attributes on `<body>` instead of environment variables. Every key is
//! optional; the defaults match the stock storefront templates.
//!
//! # Page Attributes
//!
//! - `data-api-base` - Base URL of the storefront API (default: page origin)
//! - `data-search-debounce-ms` - Quiet period before a search is sent (default: 300)
//! - `data-toast-timeout-ms` - Lifetime of a toast notification (default: 5000)
//! - `data-added-reset-ms` - How long an add-to-cart button reads "Added!" (default: 2000)
//! - `data-placeholder-image` - Image shown for products without one
//!   (default: `/static/img/placeholder.png`)
//! - `data-log-filter` - `tracing` filter directive (default: `xcommerce_storefront=info`)

use std::time::Duration;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;
use xcommerce_core::SearchQuery;

const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
const DEFAULT_TOAST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_ADDED_RESET_MS: u64 = 2_000;
const DEFAULT_PLACEHOLDER_IMAGE: &str = "/static/img/placeholder.png";
const DEFAULT_LOG_FILTER: &str = "xcommerce_storefront=info";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid page attribute {0}: {1}")]
    InvalidValue(String, String),
}

/// Button labels used by the add-to-cart flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Shown while a request is in flight
    pub loading: String,
    /// Shown after a successful add
    pub added: String,
    /// Restored once the "added" label expires
    pub add_to_cart: String,
    /// Restored after loading when no original label was recorded
    pub fallback: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            loading: "Loading...".to_string(),
            added: "Added!".to_string(),
            add_to_cart: "Add to Cart".to_string(),
            fallback: "Submit".to_string(),
        }
    }
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL the API paths are resolved against
    pub api_base: Url,
    /// Quiet period before a search query is sent
    pub search_debounce: Duration,
    /// Minimum trimmed query length before searching
    pub min_query_chars: usize,
    /// Lifetime of a toast notification
    pub toast_timeout: Duration,
    /// How long the "added" label stays on an add-to-cart button
    pub added_reset: Duration,
    /// Image used for search results without one
    pub placeholder_image: String,
    /// `tracing` filter directive for the console logger
    pub log_filter: String,
    /// Button labels
    pub labels: Labels,
}

impl StorefrontConfig {
    /// Default configuration for a page served from `origin`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `origin` is not an absolute URL.
    pub fn for_origin(origin: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: parse_url("origin", origin)?,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            min_query_chars: SearchQuery::MIN_CHARS,
            toast_timeout: Duration::from_millis(DEFAULT_TOAST_TIMEOUT_MS),
            added_reset: Duration::from_millis(DEFAULT_ADDED_RESET_MS),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            labels: Labels::default(),
        })
    }

    /// Load configuration for a page served from `origin`, applying overrides.
    ///
    /// `lookup` receives dataset keys in camelCase (`searchDebounceMs` for
    /// `data-search-debounce-ms`), matching `HTMLElement.dataset`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the origin or any override is invalid.
    pub fn from_page<F>(origin: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::for_origin(origin)?;
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base) = get("apiBase") {
            // Relative bases resolve against the page origin
            config.api_base = config
                .api_base
                .join(base.trim())
                .map_err(|e| invalid("data-api-base", e))?;
            if !config.api_base.path().ends_with('/') {
                let path = format!("{}/", config.api_base.path());
                config.api_base.set_path(&path);
            }
        }
        if let Some(ms) = get("searchDebounceMs") {
            config.search_debounce = parse_millis("data-search-debounce-ms", &ms)?;
        }
        if let Some(ms) = get("toastTimeoutMs") {
            config.toast_timeout = parse_millis("data-toast-timeout-ms", &ms)?;
        }
        if let Some(ms) = get("addedResetMs") {
            config.added_reset = parse_millis("data-added-reset-ms", &ms)?;
        }
        if let Some(image) = get("placeholderImage") {
            config.placeholder_image = image.trim().to_string();
        }
        if let Some(filter) = get("logFilter") {
            EnvFilter::try_new(filter.trim()).map_err(|e| invalid("data-log-filter", e))?;
            config.log_filter = filter.trim().to_string();
        }

        Ok(config)
    }
}

fn invalid(name: &str, err: impl ToString) -> ConfigError {
    ConfigError::InvalidValue(name.to_string(), err.to_string())
}

fn parse_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| invalid(name, e))
}

fn parse_millis(name: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| invalid(name, e))
}
