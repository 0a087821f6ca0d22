//! Request and response bodies of the storefront JSON endpoints.
//!
//! | Call | Method | Path |
//! |---|---|---|
//! | add to cart | POST | `/api/cart/add/` |
//! | remove from cart | DELETE | `/api/cart/remove/{item_id}/` |
//! | search | GET | `/api/search/?q=<query>` |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CartItemId, IdError, ProductId, VariantId, parse_quantity};

/// Add-to-cart endpoint path.
pub const ADD_TO_CART_PATH: &str = "/api/cart/add/";

/// Search endpoint path.
pub const SEARCH_PATH: &str = "/api/search/";

/// Remove-from-cart endpoint path for one cart item.
#[must_use]
pub fn remove_from_cart_path(item_id: CartItemId) -> String {
    format!("/api/cart/remove/{item_id}/")
}

/// Raw marker attributes of an add-to-cart button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductMarkers {
    /// `data-product-id`
    pub product_id: Option<String>,
    /// `data-variant-id`
    pub variant_id: Option<String>,
    /// `data-quantity`
    pub quantity: Option<String>,
}

/// Body of the add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
}

impl AddToCartRequest {
    /// Build a request from a button's marker attributes.
    ///
    /// The product id is required. A blank variant id means "no variant"; the
    /// quantity falls back to 1 when it cannot be read.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if the product id is missing or either id is not an
    /// integer.
    pub fn from_markers(markers: &ProductMarkers) -> Result<Self, IdError> {
        let product_id = ProductId::from_marker(markers.product_id.as_deref())?;
        let variant_id = match markers.variant_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse()?),
        };

        Ok(Self {
            product_id,
            variant_id,
            quantity: parse_quantity(markers.quantity.as_deref()),
        })
    }
}

/// Response body of the cart endpoints.
///
/// Successful responses carry the new cart count and subtotal; failures carry
/// an `error` or `message` explaining what went wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub cart_count: Option<u32>,
    #[serde(default)]
    pub cart_subtotal: Option<Decimal>,
}

impl CartResponse {
    /// Server-provided failure message, preferring `error` over `message`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

/// One product in a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
}

/// Response body of the search endpoint.
///
/// `results` is `None` when the key is absent or null, which is distinct from
/// an empty result list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchResult>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn markers(
        product: Option<&str>,
        variant: Option<&str>,
        quantity: Option<&str>,
    ) -> ProductMarkers {
        ProductMarkers {
            product_id: product.map(String::from),
            variant_id: variant.map(String::from),
            quantity: quantity.map(String::from),
        }
    }

    #[test]
    fn test_request_from_markers() {
        let request =
            AddToCartRequest::from_markers(&markers(Some("12"), Some("3"), Some("2"))).unwrap();
        assert_eq!(request.product_id, ProductId::new(12));
        assert_eq!(request.variant_id, Some(VariantId::new(3)));
        assert_eq!(request.quantity, 2);
    }

    #[test]
    fn test_request_quantity_defaults_to_one() {
        let request =
            AddToCartRequest::from_markers(&markers(Some("12"), None, Some("lots"))).unwrap();
        assert_eq!(request.quantity, 1);
        assert_eq!(request.variant_id, None);
    }

    #[test]
    fn test_request_requires_product() {
        let err = AddToCartRequest::from_markers(&markers(None, Some("3"), None)).unwrap_err();
        assert_eq!(err, IdError::Missing("product id"));
    }

    #[test]
    fn test_request_body_shape() {
        let request =
            AddToCartRequest::from_markers(&markers(Some("12"), Some(""), None)).unwrap();
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"product_id": 12, "variant_id": null, "quantity": 1})
        );
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        let response: CartResponse =
            serde_json::from_value(json!({"error": "Out of stock", "message": "nope"})).unwrap();
        assert_eq!(response.error_message(), Some("Out of stock"));

        let response: CartResponse =
            serde_json::from_value(json!({"success": false, "message": "No such product"})).unwrap();
        assert_eq!(response.error_message(), Some("No such product"));

        let response: CartResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.error_message(), None);
    }

    #[test]
    fn test_search_response_with_string_prices() {
        let response: SearchResponse = serde_json::from_value(json!({
            "results": [
                {"id": 1, "slug": "mug", "name": "Mug", "image": null, "price": "12.50", "category": "Kitchen"},
                {"slug": "cap", "name": "Cap", "price": "8"}
            ]
        }))
        .unwrap();

        let results = response.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].price, Decimal::new(1250, 2));
        assert_eq!(results[1].image, None);
    }

    #[test]
    fn test_search_response_missing_results() {
        let response: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.results, None);

        let response: SearchResponse = serde_json::from_value(json!({"results": []})).unwrap();
        assert_eq!(response.results, Some(Vec::new()));
    }

    #[test]
    fn test_cart_response_subtotal() {
        let response: CartResponse =
            serde_json::from_value(json!({"success": true, "cart_count": 2, "cart_subtotal": "42.5"}))
                .unwrap();
        assert_eq!(response.cart_count, Some(2));
        assert_eq!(response.cart_subtotal, Some(Decimal::new(425, 1)));
    }
}
