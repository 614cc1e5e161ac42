// src/services/submenu.rs

//! Category submenu resolver.
//!
//! Submenu pages are static HTML, so a plain fetch is enough; only the
//! landing page needs a rendering session.

use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::models::SiteConfig;
use crate::services::parse_selector;
use crate::utils::http::fetch_text;
use crate::utils::{is_product, resolve_url};

/// Resolves a category/browse submenu page into its product links.
pub struct SubmenuResolver<'a> {
    client: &'a Client,
    site: SiteConfig,
}

impl<'a> SubmenuResolver<'a> {
    pub fn new(client: &'a Client, site: &SiteConfig) -> Self {
        Self {
            client,
            site: site.clone(),
        }
    }

    /// Fetch one submenu page and return the product links it lists.
    ///
    /// A page listing no products yields an empty vec. Fetch or parse
    /// failures are hard errors for this submenu only; the discovery pass
    /// logs them and moves on.
    pub async fn resolve(&self, url: &str) -> Result<Vec<String>> {
        let body = fetch_text(self.client, url).await?;
        self.product_links(url, &body)
    }

    /// Collect product links from a submenu body.
    ///
    /// Keeps every href under the configured link selector that classifies
    /// as a product reference; share/tracking links and further category
    /// links are dropped. Relative hrefs are resolved against the page URL.
    fn product_links(&self, page_url: &str, body: &str) -> Result<Vec<String>> {
        let document = Html::parse_document(body);
        let link_selector = parse_selector(&self.site.submenu_link_selector)?;
        let base = Url::parse(page_url)?;

        let mut links = Vec::new();
        for element in document.select(&link_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = resolve_url(&base, href);
            if is_product(&href, &self.site.product_marker) {
                links.push(href);
            }
        }
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.amazon.it/deal/abc123";

    fn resolver_links(body: &str) -> Vec<String> {
        let client = Client::new();
        let resolver = SubmenuResolver::new(&client, &SiteConfig::default());
        resolver.product_links(PAGE_URL, body).unwrap()
    }

    #[test]
    fn test_collects_product_links_and_resolves_relative_hrefs() {
        let body = r#"
            <div id="grid">
                <a class="a-link-normal" href="/dp/B0AAA111?ref=deal">one</a>
                <a class="a-link-normal" href="https://www.amazon.it/dp/B0BBB222/">two</a>
            </div>
        "#;
        let links = resolver_links(body);
        assert_eq!(
            links,
            vec![
                "https://www.amazon.it/dp/B0AAA111?ref=deal",
                "https://www.amazon.it/dp/B0BBB222/",
            ]
        );
    }

    #[test]
    fn test_drops_non_product_links() {
        let body = r#"
            <a class="a-link-normal" href="/gp/share?product=B0AAA111">share</a>
            <a class="a-link-normal" href="/browse/?node=5">more deals</a>
            <a class="nav-link" href="/dp/B0CCC333">wrong class</a>
            <a class="a-link-normal">no href</a>
        "#;
        assert!(resolver_links(body).is_empty());
    }

    #[test]
    fn test_empty_body_yields_empty_vec() {
        assert!(resolver_links("<html><body></body></html>").is_empty());
    }
}
