// src/error.rs

//! Unified error handling for the scraper.

use std::fmt;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rendering session (headless browser) error
    #[error("Browser error: {0}")]
    Browser(String),

    /// The landing page never reached the expected state. Fatal to the
    /// discovery pass, unlike per-submenu or per-product failures.
    #[error("Structural failure in {stage}: {message}")]
    Structural { stage: String, message: String },

    /// A link carried the product marker but no usable identifier.
    #[error("Malformed product link '{url}': {message}")]
    Identifier { url: String, message: String },

    /// A required field was absent from a product detail page.
    #[error("Extraction failed for product {id}: missing {field}")]
    Extraction { id: String, field: &'static str },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a rendering-session error.
    pub fn browser(message: impl fmt::Display) -> Self {
        Self::Browser(message.to_string())
    }

    /// Create a structural failure for a pipeline stage.
    pub fn structural(stage: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Structural {
            stage: stage.into(),
            message: message.to_string(),
        }
    }

    /// Create a malformed-identifier error.
    pub fn identifier(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Identifier {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an extraction error for a missing detail-page field.
    pub fn extraction(id: impl Into<String>, field: &'static str) -> Self {
        Self::Extraction {
            id: id.into(),
            field,
        }
    }
}
