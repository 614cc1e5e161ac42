// src/services/navigator.rs

//! Deals landing-page navigator.
//!
//! Drives a rendering session to the discount-filtered view of the landing
//! page and collects the hrefs of every deal card. Deal cards are rendered
//! client-side with no ready signal exposed to the caller, so the navigator
//! polls for them under a bounded attempt budget; exhausting the budget is a
//! structural failure for the whole discovery pass, not an empty result.

use std::thread;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::SiteConfig;
use crate::services::RenderSession;

/// Collects raw deal-card links from the rendered landing page.
pub struct DealsNavigator {
    site: SiteConfig,
}

impl DealsNavigator {
    pub fn new(site: &SiteConfig) -> Self {
        Self { site: site.clone() }
    }

    /// Collect the href of every deal card on the discount-filtered landing
    /// page. The result mixes direct product links and submenu links; the
    /// caller partitions them.
    pub fn collect_landing_links<S: RenderSession>(&self, session: &S) -> Result<Vec<String>> {
        session.navigate(&self.site.deals_url)?;

        log::debug!("Activating discount filter '{}'", self.site.discount_label);
        if !session.click_link_containing(&self.site.discount_label)? {
            return Err(AppError::structural(
                "landing",
                format!(
                    "discount filter control matching '{}' not found",
                    self.site.discount_label
                ),
            ));
        }

        let interval = Duration::from_millis(self.site.poll_interval_ms);
        for attempt in 0..self.site.max_poll_attempts {
            let hrefs = session.hrefs_matching(&self.site.deal_card_selector)?;
            if !hrefs.is_empty() {
                log::debug!(
                    "Found {} deal cards after {} poll attempts",
                    hrefs.len(),
                    attempt + 1
                );
                return Ok(hrefs);
            }
            thread::sleep(interval);
        }

        Err(AppError::structural(
            "landing",
            format!(
                "no deal cards matched '{}' after {} attempts",
                self.site.deal_card_selector, self.site.max_poll_attempts
            ),
        ))
    }
}
