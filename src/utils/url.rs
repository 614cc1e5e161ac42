// src/utils/url.rs

//! Link classification and identifier extraction.

use std::collections::HashSet;

use url::Url;

use crate::error::{AppError, Result};
use crate::models::ProductId;

/// Resolve a potentially relative href against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Whether a URL references a product listing.
pub fn is_product(url: &str, marker: &str) -> bool {
    url.contains(marker)
}

/// Whether a URL references a category/browse submenu.
pub fn is_submenu(url: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| url.contains(m))
}

/// Extract the canonical product identifier from a URL.
///
/// The identifier is the path segment immediately after the product marker,
/// terminated by `/`, `?`, `#` or the end of the URL. Returns `Ok(None)` for
/// URLs without the marker. A marker followed by no usable token is an
/// explicit error, never a truncated identifier.
pub fn extract_product_id(url: &str, marker: &str) -> Result<Option<ProductId>> {
    let Some(pos) = url.find(marker) else {
        return Ok(None);
    };

    let rest = &url[pos + marker.len()..];
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let token = &rest[..end];

    if token.is_empty() {
        return Err(AppError::identifier(
            url,
            "product marker present but no identifier follows",
        ));
    }
    Ok(Some(ProductId::new(token)))
}

/// Reduce a sequence of identifiers to its unique members.
///
/// First-seen order is preserved so fixtures stay reproducible; downstream
/// consumers attach no meaning to the order.
pub fn dedupe_ids(ids: impl IntoIterator<Item = ProductId>) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();
    for id in ids {
        if seen.insert(id.clone()) {
            deduped.push(id);
        }
    }
    deduped
}
