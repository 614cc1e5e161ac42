// src/lib.rs

//! dealwatch — deals-page discovery and extraction.
//!
//! Crawls a retail deals landing page (script-rendered, so driven through a
//! headless browser), resolves its category submenus, and fetches a
//! normalized pricing record for every discounted product it finds.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
