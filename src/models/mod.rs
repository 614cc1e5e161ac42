// src/models/mod.rs

//! Domain models for the scraper.

mod config;
mod product;

// Re-export all public types
pub use config::{Config, CrawlerConfig, SiteConfig};
pub use product::{ProductId, ProductRecord};
