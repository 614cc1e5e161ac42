// src/services/mod.rs

//! Service layer for the scraper.
//!
//! - Rendering session over a headless browser (`ChromeSession`)
//! - Landing-page navigation (`DealsNavigator`)
//! - Category submenu resolution (`SubmenuResolver`)
//! - Product detail extraction (`ProductFetcher`)

mod detail;
mod navigator;
mod session;
mod submenu;

pub use detail::ProductFetcher;
pub use navigator::DealsNavigator;
pub use session::{ChromeSession, RenderSession};
pub use submenu::SubmenuResolver;

use crate::error::{AppError, Result};

pub(crate) fn parse_selector(s: &str) -> Result<scraper::Selector> {
    scraper::Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
