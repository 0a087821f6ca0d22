//! Search result rendering.

use askama::Template;
use xcommerce_core::{Price, SearchResult};

/// Search result display data for templates.
#[derive(Debug, Clone)]
pub struct SearchResultView {
    pub href: String,
    pub image: String,
    pub name: String,
    pub price: String,
}

impl SearchResultView {
    /// Build display data, substituting `placeholder` for a missing image.
    #[must_use]
    pub fn new(result: &SearchResult, placeholder: &str) -> Self {
        let image = result
            .image
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(placeholder);

        Self {
            href: format!("/products/{}/", urlencoding::encode(&result.slug)),
            image: image.to_string(),
            name: result.name.clone(),
            price: Price::usd(result.price).display(),
        }
    }
}

/// Search suggestions fragment.
#[derive(Template)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate {
    pub results: Vec<SearchResultView>,
}

/// Render search results, or the "no results" message for an empty list.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_search_results(
    results: &[SearchResult],
    placeholder: &str,
) -> Result<String, askama::Error> {
    SearchResultsTemplate {
        results: results
            .iter()
            .map(|r| SearchResultView::new(r, placeholder))
            .collect(),
    }
    .render()
}
