//! Storefront API client for cart and search endpoints.
//!
//! Thin wrapper over `reqwest` (backed by `fetch` on `wasm32`). Mutating
//! requests carry the page's CSRF token in the `X-CSRFToken` header.

use reqwest::StatusCode;
use reqwest::header::{HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;
use xcommerce_core::{
    ADD_TO_CART_PATH, AddToCartRequest, CartItemId, CartResponse, SEARCH_PATH, SearchQuery,
    SearchResponse, SearchResult, remove_from_cart_path,
};

use crate::error::{Result, UiError};

/// Header carrying the CSRF token.
pub const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

/// Name of the form field the page renders the CSRF token into.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Storefront API client.
///
/// Implements `Debug` manually to redact the CSRF token.
#[derive(Clone)]
pub struct StorefrontApi {
    client: reqwest::Client,
    base_url: Url,
    csrf_token: SecretString,
}

impl std::fmt::Debug for StorefrontApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontApi")
            .field("base_url", &self.base_url.as_str())
            .field("csrf_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl StorefrontApi {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url, csrf_token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url,
            csrf_token: SecretString::from(csrf_token.into()),
        })
    }

    /// Base URL endpoint paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn csrf_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(self.csrf_token.expose_secret())
            .map_err(|e| UiError::Dom(format!("invalid CSRF token: {e}")))
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Api` for a non-success status (with the server's
    /// message when the body carries one) and `UiError::Http` when the request
    /// fails or the success body cannot be decoded.
    #[instrument(skip(self, request), fields(product_id = %request.product_id, quantity = request.quantity))]
    pub async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<CartResponse> {
        let url = self.endpoint(ADD_TO_CART_PATH)?;

        let response = self
            .client
            .post(url)
            .header(CSRF_HEADER, self.csrf_header()?)
            .json(request)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Ok(response.json().await?)
    }

    /// Remove an item from the cart.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Api` for a non-success status and `UiError::Http`
    /// when the request fails.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, item_id: CartItemId) -> Result<()> {
        let url = self.endpoint(&remove_from_cart_path(item_id))?;

        let response = self
            .client
            .delete(url)
            .header(CSRF_HEADER, self.csrf_header()?)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Ok(())
    }

    /// Search products.
    ///
    /// Returns `None` when the response body has no `results` list.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Api` for a non-success status and `UiError::Http`
    /// when the request fails or the body cannot be decoded.
    #[instrument(skip(self, query), fields(query = %query))]
    pub async fn search(&self, query: &SearchQuery) -> Result<Option<Vec<SearchResult>>> {
        let url = self.endpoint(&format!(
            "{SEARCH_PATH}?q={}",
            urlencoding::encode(query.as_str())
        ))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.results)
    }
}

/// Build an API error from a failed response, keeping the server's message
/// when the body is a cart response that carries one.
fn api_error(status: StatusCode, body: &str) -> UiError {
    let message = serde_json::from_str::<CartResponse>(body)
        .ok()
        .and_then(|r| r.error_message().map(str::to_string));

    UiError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> StorefrontApi {
        StorefrontApi::new(Url::parse(base).unwrap(), "token").unwrap()
    }

    #[test]
    fn test_endpoint_under_base_path() {
        let api = api("https://shop.example/store/");
        assert_eq!(
            api.endpoint(ADD_TO_CART_PATH).unwrap().as_str(),
            "https://shop.example/store/api/cart/add/"
        );
        assert_eq!(
            api.endpoint(&remove_from_cart_path(CartItemId::new(9)))
                .unwrap()
                .as_str(),
            "https://shop.example/store/api/cart/remove/9/"
        );
    }

    #[test]
    fn test_search_query_is_percent_encoded() {
        let api = api("https://shop.example/");
        let url = api
            .endpoint(&format!("{SEARCH_PATH}?q={}", urlencoding::encode("mugs & cups")))
            .unwrap();
        assert_eq!(url.as_str(), "https://shop.example/api/search/?q=mugs%20%26%20cups");
    }

    #[test]
    fn test_api_error_reads_message() {
        let err = api_error(StatusCode::BAD_REQUEST, r#"{"error": "Out of stock"}"#);
        assert!(matches!(
            err,
            UiError::Api { status: 400, message: Some(ref m) } if m == "Out of stock"
        ));

        let err = api_error(StatusCode::BAD_GATEWAY, "<html>Bad gateway</html>");
        assert!(matches!(
            err,
            UiError::Api {
                status: 502,
                message: None
            }
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", api("https://shop.example/"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("token\""));
    }
}
