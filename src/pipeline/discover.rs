// src/pipeline/discover.rs

//! Discovery pass: collect the deduplicated identifier set for one run.
//!
//! The landing page yields a mix of direct product links and category
//! submenu links. Submenus are resolved over plain HTTP; each one that
//! fails contributes zero identifiers and a diagnostic counter, while a
//! failure of the landing page itself aborts the pass. Callers therefore
//! always see the difference between "no deals today" (`Ok` with an empty
//! set) and "discovery failed" (`Err`).

use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{Config, ProductId};
use crate::services::{DealsNavigator, RenderSession, SubmenuResolver};
use crate::utils::{dedupe_ids, extract_product_id, is_product, is_submenu};

/// Result of one discovery pass. Created fresh per pass; repeats across
/// passes are the caller's concern.
#[derive(Debug, Default)]
pub struct DiscoveryOutcome {
    /// Deduplicated identifiers, in first-seen order
    pub ids: Vec<ProductId>,
    /// Submenus found on the landing page
    pub submenu_total: usize,
    /// Submenus that failed to fetch or parse (recovered, zero identifiers)
    pub submenu_failures: usize,
    /// Links carrying the product marker but no valid identifier
    pub malformed_links: usize,
}

/// Run one discovery pass with the given rendering session.
///
/// The session is consumed: browser work runs on a blocking thread and the
/// session is dropped (browser torn down) when the landing-page collection
/// finishes, before any HTTP fetches start.
pub async fn discover<S>(config: &Config, client: &Client, session: S) -> Result<DiscoveryOutcome>
where
    S: RenderSession + Send + 'static,
{
    let navigator = DealsNavigator::new(&config.site);
    let landing =
        tokio::task::spawn_blocking(move || navigator.collect_landing_links(&session))
            .await
            .map_err(|e| AppError::browser(format!("render task failed: {e}")))??;

    log::info!("Landing page yielded {} deal-card links", landing.len());

    let mut candidates = Vec::new();
    let mut submenus = Vec::new();
    for href in landing {
        if is_product(&href, &config.site.product_marker) {
            candidates.push(href);
        } else if is_submenu(&href, &config.site.submenu_markers) {
            submenus.push(href);
        }
    }

    let resolver = SubmenuResolver::new(client, &config.site);
    let delay = Duration::from_millis(config.crawler.request_delay_ms);
    let mut outcome = DiscoveryOutcome {
        submenu_total: submenus.len(),
        ..DiscoveryOutcome::default()
    };

    for submenu in &submenus {
        match resolver.resolve(submenu).await {
            Ok(links) => {
                log::debug!("Submenu {} listed {} products", submenu, links.len());
                candidates.extend(links);
            }
            Err(error) => {
                outcome.submenu_failures += 1;
                log::warn!("Failed to resolve submenu {submenu}: {error}");
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    let mut ids = Vec::new();
    for href in &candidates {
        match extract_product_id(href, &config.site.product_marker) {
            Ok(Some(id)) => ids.push(id),
            Ok(None) => {}
            Err(error) => {
                outcome.malformed_links += 1;
                log::error!("{error}");
            }
        }
    }

    outcome.ids = dedupe_ids(ids);
    log::info!(
        "Discovery pass: {} unique products, {}/{} submenus failed, {} malformed links",
        outcome.ids.len(),
        outcome.submenu_failures,
        outcome.submenu_total,
        outcome.malformed_links
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Session whose landing page always renders the given links.
    struct StaticSession {
        links: Vec<String>,
    }

    impl RenderSession for StaticSession {
        fn navigate(&self, _url: &str) -> Result<()> {
            Ok(())
        }

        fn click_link_containing(&self, _needle: &str) -> Result<bool> {
            Ok(true)
        }

        fn hrefs_matching(&self, _selector: &str) -> Result<Vec<String>> {
            Ok(self.links.clone())
        }
    }

    fn test_config(server_uri: &str) -> Config {
        let mut config = Config::default();
        config.crawler.request_delay_ms = 0;
        config.site.base_url = server_uri.to_string();
        config
    }

    #[tokio::test]
    async fn test_discover_unions_submenus_and_dedupes() {
        let server = MockServer::start().await;

        let submenu_body = format!(
            r#"<a class="a-link-normal" href="{base}/dp/B0AAA111?ref=sub">a</a>
               <a class="a-link-normal" href="{base}/dp/B0CCC333">c</a>"#,
            base = server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/deal/night-deals"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string(submenu_body))
            .mount(&server)
            .await;

        let session = StaticSession {
            links: vec![
                // Direct product link, repeated under a decorated variant
                format!("{}/dp/B0AAA111/ref=card", server.uri()),
                // Submenu link
                format!("{}/deal/night-deals", server.uri()),
                // Unrelated link, silently ignored
                format!("{}/gp/help", server.uri()),
            ],
        };

        let config = test_config(&server.uri());
        let client = crate::utils::http::create_client(&config.crawler).unwrap();
        let outcome = discover(&config, &client, session).await.unwrap();

        assert_eq!(
            outcome.ids,
            vec![ProductId::new("B0AAA111"), ProductId::new("B0CCC333")]
        );
        assert_eq!(outcome.submenu_total, 1);
        assert_eq!(outcome.submenu_failures, 0);
        assert_eq!(outcome.malformed_links, 0);
    }

    #[tokio::test]
    async fn test_failed_submenu_contributes_zero_without_aborting() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/deal/broken"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let session = StaticSession {
            links: vec![
                format!("{}/dp/B0AAA111", server.uri()),
                format!("{}/deal/broken", server.uri()),
            ],
        };

        let config = test_config(&server.uri());
        let client = crate::utils::http::create_client(&config.crawler).unwrap();
        let outcome = discover(&config, &client, session).await.unwrap();

        assert_eq!(outcome.ids, vec![ProductId::new("B0AAA111")]);
        assert_eq!(outcome.submenu_failures, 1);
    }

    #[tokio::test]
    async fn test_malformed_product_link_is_counted_not_propagated() {
        let server = MockServer::start().await;

        let session = StaticSession {
            links: vec![
                format!("{}/dp/", server.uri()),
                format!("{}/dp/B0AAA111", server.uri()),
            ],
        };

        let config = test_config(&server.uri());
        let client = crate::utils::http::create_client(&config.crawler).unwrap();
        let outcome = discover(&config, &client, session).await.unwrap();

        assert_eq!(outcome.ids, vec![ProductId::new("B0AAA111")]);
        assert_eq!(outcome.malformed_links, 1);
    }
}
