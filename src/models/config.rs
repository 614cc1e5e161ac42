//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Deals-site layout: URLs, markers and CSS selectors
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::config("crawler.max_concurrent must be > 0"));
        }
        if !self.site.base_url.starts_with("http") {
            return Err(AppError::config("site.base_url must be an absolute URL"));
        }
        if self.site.discount_label.trim().is_empty() {
            return Err(AppError::config("site.discount_label is empty"));
        }
        if self.site.product_marker.trim().is_empty() {
            return Err(AppError::config("site.product_marker is empty"));
        }
        if self.site.max_poll_attempts == 0 {
            return Err(AppError::config("site.max_poll_attempts must be > 0"));
        }
        for selector in [
            &self.site.deal_card_selector,
            &self.site.submenu_link_selector,
            &self.site.title_selector,
            &self.site.original_price_selector,
            &self.site.price_selector,
            &self.site.discount_selector,
            &self.site.image_selector,
        ] {
            Selector::parse(selector).map_err(|e| AppError::selector(selector, format!("{e:?}")))?;
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests. The site refuses unidentified
    /// automated clients, so this must look like a real browser.
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent detail-page requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Deals-site layout: page URLs, URL markers and CSS selectors.
///
/// Defaults target amazon.it; every value can be overridden from the config
/// file when the site ships a new page template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site root, used to build product detail URLs
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Deals landing page (script-rendered)
    #[serde(default = "defaults::deals_url")]
    pub deals_url: String,

    /// Substring of the discount-filter control label. A substring is matched
    /// instead of the full label because the label renders with
    /// locale-specific characters ("Sconto del 50% o più").
    #[serde(default = "defaults::discount_label")]
    pub discount_label: String,

    /// Selector for deal cards on the filtered landing page
    #[serde(default = "defaults::deal_card_selector")]
    pub deal_card_selector: String,

    /// Selector for product links inside a category submenu page
    #[serde(default = "defaults::submenu_link_selector")]
    pub submenu_link_selector: String,

    /// Path marker preceding a product's identifier
    #[serde(default = "defaults::product_marker")]
    pub product_marker: String,

    /// Path markers identifying category/browse submenu links
    #[serde(default = "defaults::submenu_markers")]
    pub submenu_markers: Vec<String>,

    /// Query string appended to detail URLs. Selects the default purchase
    /// option so the page shows a concrete price instead of a range.
    #[serde(default = "defaults::detail_query")]
    pub detail_query: String,

    /// Detail-page field selectors
    #[serde(default = "defaults::title_selector")]
    pub title_selector: String,
    #[serde(default = "defaults::original_price_selector")]
    pub original_price_selector: String,
    #[serde(default = "defaults::price_selector")]
    pub price_selector: String,
    #[serde(default = "defaults::discount_selector")]
    pub discount_selector: String,
    #[serde(default = "defaults::image_selector")]
    pub image_selector: String,

    /// Interval between landing-page polls in milliseconds
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_ms: u64,

    /// Maximum landing-page poll attempts before the pass fails
    #[serde(default = "defaults::max_poll_attempts")]
    pub max_poll_attempts: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            deals_url: defaults::deals_url(),
            discount_label: defaults::discount_label(),
            deal_card_selector: defaults::deal_card_selector(),
            submenu_link_selector: defaults::submenu_link_selector(),
            product_marker: defaults::product_marker(),
            submenu_markers: defaults::submenu_markers(),
            detail_query: defaults::detail_query(),
            title_selector: defaults::title_selector(),
            original_price_selector: defaults::original_price_selector(),
            price_selector: defaults::price_selector(),
            discount_selector: defaults::discount_selector(),
            image_selector: defaults::image_selector(),
            poll_interval_ms: defaults::poll_interval(),
            max_poll_attempts: defaults::max_poll_attempts(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        250
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Site defaults (amazon.it)
    pub fn base_url() -> String {
        "https://www.amazon.it".into()
    }
    pub fn deals_url() -> String {
        "https://www.amazon.it/deals/".into()
    }
    pub fn discount_label() -> String {
        "Sconto del 50%".into()
    }
    pub fn deal_card_selector() -> String {
        "a[class*='DealCard']".into()
    }
    pub fn submenu_link_selector() -> String {
        "a[class*='a-link-normal']".into()
    }
    pub fn product_marker() -> String {
        "/dp/".into()
    }
    pub fn submenu_markers() -> Vec<String> {
        vec!["/deal/".into(), "/browse/".into()]
    }
    pub fn detail_query() -> String {
        "th=1&psc=1".into()
    }
    pub fn title_selector() -> String {
        "span#productTitle".into()
    }
    pub fn original_price_selector() -> String {
        "span[data-a-strike='true'] span[aria-hidden='true']".into()
    }
    pub fn price_selector() -> String {
        "span[class*='priceToPay'] span.a-offscreen".into()
    }
    pub fn discount_selector() -> String {
        "span[class*='savingsPercentage']".into()
    }
    pub fn image_selector() -> String {
        "img#landingImage".into()
    }
    pub fn poll_interval() -> u64 {
        500
    }
    pub fn max_poll_attempts() -> u32 {
        120
    }
}
