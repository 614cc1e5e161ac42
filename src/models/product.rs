//! Product data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical identifier of a product listing.
///
/// An opaque token taken from the product path of a listing URL. Differently
/// decorated URLs for the same listing (query strings, locale paths, trailing
/// path segments) yield the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully extracted product deal.
///
/// Either every field is populated or the record does not exist; extraction
/// reports a missing field as an error instead of producing a partial record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRecord {
    /// Canonical product identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Struck-through price before the discount, as shown on the page
    pub original_price: String,

    /// Current (discounted) price, as shown on the page
    pub discounted_price: String,

    /// Discount percentage label, e.g. `-52%`
    pub discount_rate: String,

    /// Main product image, normalized to the base (highest-resolution) asset
    pub image_url: String,
}

impl ProductRecord {
    /// Format the record for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{title}`, `{original_price}`, `{discounted_price}`
    /// - `{discount_rate}`, `{image_url}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{id}", self.id.as_str())
            .replace("{title}", &self.title)
            .replace("{original_price}", &self.original_price)
            .replace("{discounted_price}", &self.discounted_price)
            .replace("{discount_rate}", &self.discount_rate)
            .replace("{image_url}", &self.image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProductRecord {
        ProductRecord {
            id: ProductId::new("B0ABC123"),
            title: "Cuffie wireless".to_string(),
            original_price: "99,99€".to_string(),
            discounted_price: "49,99€".to_string(),
            discount_rate: "-50%".to_string(),
            image_url: "https://img.example.com/I/abc.jpg".to_string(),
        }
    }

    #[test]
    fn test_format() {
        let record = sample_record();
        let result = record.format("{title}: {discounted_price} ({discount_rate})");
        assert_eq!(result, "Cuffie wireless: 49,99€ (-50%)");
    }

    #[test]
    fn test_product_id_serializes_as_plain_string() {
        let id = ProductId::new("B0ABC123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"B0ABC123\"");
    }
}
