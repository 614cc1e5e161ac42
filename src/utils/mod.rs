//! Utility functions and helpers.

pub mod http;
pub mod url;

pub use url::{dedupe_ids, extract_product_id, is_product, is_submenu, resolve_url};
