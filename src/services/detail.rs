// src/services/detail.rs

//! Product detail fetcher.
//!
//! Builds the canonical detail URL for an identifier, fetches the page and
//! extracts the five required fields. A field can legitimately be absent
//! (subscription-only deal, ended deal, price range instead of a concrete
//! price); that yields an extraction error naming the field, never a
//! partially filled record.

use reqwest::Client;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{ProductId, ProductRecord, SiteConfig};
use crate::services::parse_selector;
use crate::utils::http::fetch_text;

/// Fetches and extracts one product detail page per identifier.
pub struct ProductFetcher<'a> {
    client: &'a Client,
    site: SiteConfig,
}

impl<'a> ProductFetcher<'a> {
    pub fn new(client: &'a Client, site: &SiteConfig) -> Self {
        Self {
            client,
            site: site.clone(),
        }
    }

    /// Canonical detail-page URL for an identifier. The configured query
    /// string pins the default purchase option so the page shows a concrete
    /// price instead of a range.
    pub fn detail_url(&self, id: &ProductId) -> String {
        format!(
            "{}{}{}?{}",
            self.site.base_url.trim_end_matches('/'),
            self.site.product_marker,
            id,
            self.site.detail_query,
        )
    }

    /// Fetch one product's detail page and extract its record.
    ///
    /// HTTP failures and missing fields are both hard failures for this one
    /// identifier; the caller isolates them so the pass completes with a
    /// partial result set.
    pub async fn fetch(&self, id: &ProductId) -> Result<ProductRecord> {
        let url = self.detail_url(id);
        let body = fetch_text(self.client, &url).await?;
        self.extract_record(id, &body)
    }

    /// Extract all five required fields from a detail-page body.
    fn extract_record(&self, id: &ProductId, body: &str) -> Result<ProductRecord> {
        let document = Html::parse_document(body);

        let title = self.select_text(&document, &self.site.title_selector, id, "title")?;
        let original_price = self.select_text(
            &document,
            &self.site.original_price_selector,
            id,
            "original_price",
        )?;
        let discounted_price =
            self.select_text(&document, &self.site.price_selector, id, "discounted_price")?;
        let discount_rate =
            self.select_text(&document, &self.site.discount_selector, id, "discount_rate")?;

        let image_selector = parse_selector(&self.site.image_selector)?;
        let image_url = document
            .select(&image_selector)
            .next()
            .and_then(|e| e.value().attr("src"))
            .ok_or_else(|| AppError::extraction(id.as_str(), "image_url"))?;

        Ok(ProductRecord {
            id: id.clone(),
            title,
            original_price,
            discounted_price,
            discount_rate,
            image_url: base_image_url(image_url),
        })
    }

    /// Trimmed text of the first element matching `selector`, or an
    /// extraction error naming the missing field.
    fn select_text(
        &self,
        document: &Html,
        selector: &str,
        id: &ProductId,
        field: &'static str,
    ) -> Result<String> {
        let selector = parse_selector(selector)?;
        let text = document
            .select(&selector)
            .next()
            .map(|e| e.text().collect::<String>())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::extraction(id.as_str(), field))?;
        Ok(text)
    }
}

/// Strip the image CDN's resolution suffix so the URL references the base
/// (highest-resolution) asset: `.../I/abc._AC_SL500_.jpg` → `.../I/abc.jpg`.
fn base_image_url(url: &str) -> String {
    let Some(start) = url.rfind("._") else {
        return url.to_string();
    };
    let rest = &url[start + 2..];
    match rest.find('.') {
        Some(dot) => format!("{}{}", &url[..start], &rest[dot..]),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(
        title: &str,
        original: &str,
        price: &str,
        discount: &str,
        image: &str,
    ) -> String {
        format!(
            r#"<html><body>
                {title}
                {original}
                {price}
                {discount}
                {image}
            </body></html>"#
        )
    }

    const TITLE: &str = r#"<span id="productTitle"> Cuffie wireless </span>"#;
    const ORIGINAL: &str =
        r#"<span data-a-strike="true"><span aria-hidden="true">99,99€</span></span>"#;
    const PRICE: &str =
        r#"<span class="a-price priceToPay"><span class="a-offscreen">49,99€</span></span>"#;
    const DISCOUNT: &str = r#"<span class="savingsPercentage">-50%</span>"#;
    const IMAGE: &str =
        r#"<img id="landingImage" src="https://m.media.example.com/I/abc._AC_SL1500_.jpg"/>"#;

    fn fetcher_extract(body: &str) -> Result<ProductRecord> {
        let client = Client::new();
        let fetcher = ProductFetcher::new(&client, &SiteConfig::default());
        fetcher.extract_record(&ProductId::new("B0ABC123"), body)
    }

    #[test]
    fn test_extracts_full_record_when_all_fields_present() {
        let body = fixture(TITLE, ORIGINAL, PRICE, DISCOUNT, IMAGE);
        let record = fetcher_extract(&body).unwrap();

        assert_eq!(record.id, ProductId::new("B0ABC123"));
        assert_eq!(record.title, "Cuffie wireless");
        assert_eq!(record.original_price, "99,99€");
        assert_eq!(record.discounted_price, "49,99€");
        assert_eq!(record.discount_rate, "-50%");
        assert_eq!(record.image_url, "https://m.media.example.com/I/abc.jpg");
    }

    #[test]
    fn test_each_missing_field_is_an_extraction_error() {
        let cases = [
            (fixture("", ORIGINAL, PRICE, DISCOUNT, IMAGE), "title"),
            (fixture(TITLE, "", PRICE, DISCOUNT, IMAGE), "original_price"),
            (fixture(TITLE, ORIGINAL, "", DISCOUNT, IMAGE), "discounted_price"),
            (fixture(TITLE, ORIGINAL, PRICE, "", IMAGE), "discount_rate"),
            (fixture(TITLE, ORIGINAL, PRICE, DISCOUNT, ""), "image_url"),
        ];

        for (body, expected_field) in cases {
            match fetcher_extract(&body) {
                Err(AppError::Extraction { id, field }) => {
                    assert_eq!(id, "B0ABC123");
                    assert_eq!(field, expected_field);
                }
                other => panic!("expected Extraction error for {expected_field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_price_range_page_has_no_concrete_price() {
        // Option pages render a range without the priceToPay block.
        let range = r#"<span class="a-price-range">29,99€ - 59,99€</span>"#;
        let body = fixture(TITLE, ORIGINAL, range, DISCOUNT, IMAGE);
        match fetcher_extract(&body) {
            Err(AppError::Extraction { field, .. }) => assert_eq!(field, "discounted_price"),
            other => panic!("expected Extraction error, got {other:?}"),
        }
    }

    #[test]
    fn test_detail_url_appends_marker_id_and_query() {
        let client = Client::new();
        let fetcher = ProductFetcher::new(&client, &SiteConfig::default());
        assert_eq!(
            fetcher.detail_url(&ProductId::new("B0ABC123")),
            "https://www.amazon.it/dp/B0ABC123?th=1&psc=1"
        );
    }

    #[test]
    fn test_base_image_url_strips_resolution_suffix() {
        assert_eq!(
            base_image_url("https://m.media.example.com/I/abc._AC_SL500_.jpg"),
            "https://m.media.example.com/I/abc.jpg"
        );
        assert_eq!(
            base_image_url("https://m.media.example.com/I/abc._SX342_SY445_.png"),
            "https://m.media.example.com/I/abc.png"
        );
    }

    #[test]
    fn test_base_image_url_leaves_plain_urls_untouched() {
        assert_eq!(
            base_image_url("https://m.media.example.com/I/abc.jpg"),
            "https://m.media.example.com/I/abc.jpg"
        );
    }
}
