// src/pipeline/mod.rs

//! Pipeline entry points for scraper passes.
//!
//! - `discover`: one discovery pass over the landing page and its submenus
//! - `run_scrape`: full pass, discovery plus detail extraction

pub mod discover;
pub mod scrape;

pub use discover::{DiscoveryOutcome, discover};
pub use scrape::{ScrapeOutcome, run_scrape};
