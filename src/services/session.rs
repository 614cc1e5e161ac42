// src/services/session.rs

//! Rendering session over a headless browser.
//!
//! The deals landing page populates its listings with client-side scripts,
//! so a plain HTTP fetch sees an empty shell. The [`RenderSession`] trait is
//! the small capability surface the navigator needs from a script-capable
//! backend; [`ChromeSession`] implements it with `headless_chrome`.

use std::sync::Arc;

use headless_chrome::{Browser, LaunchOptions, Tab};

use crate::error::{AppError, Result};

/// Capability contract for a script-capable rendering backend.
pub trait RenderSession {
    /// Navigate to a URL and wait for the document load to settle.
    fn navigate(&self, url: &str) -> Result<()>;

    /// Click the first anchor whose visible text contains `needle`.
    /// Returns `false` when no anchor matches.
    fn click_link_containing(&self, needle: &str) -> Result<bool>;

    /// Hrefs of all anchors currently matching a CSS selector.
    fn hrefs_matching(&self, selector: &str) -> Result<Vec<String>>;
}

/// Rendering session backed by a headless Chrome process.
///
/// Sessions are scoped to one discovery pass: created at the start, dropped
/// at the end. Dropping the session tears the browser process down on every
/// exit path, so failed passes never leak a browser across scheduled runs.
pub struct ChromeSession {
    // Keeps the browser process alive for the lifetime of the session.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Launch a headless browser and open a single tab.
    pub fn launch() -> Result<Self> {
        let browser = Browser::new(LaunchOptions {
            headless: true,
            ..Default::default()
        })
        .map_err(AppError::browser)?;

        let tab = browser.new_tab().map_err(AppError::browser)?;

        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl RenderSession for ChromeSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab.navigate_to(url).map_err(AppError::browser)?;
        self.tab.wait_until_navigated().map_err(AppError::browser)?;
        Ok(())
    }

    fn click_link_containing(&self, needle: &str) -> Result<bool> {
        let script = format!(
            r#"(() => {{
                const needle = {needle};
                for (const anchor of document.querySelectorAll('a')) {{
                    if ((anchor.textContent || '').includes(needle)) {{
                        anchor.click();
                        return true;
                    }}
                }}
                return false;
            }})()"#,
            needle = js_string(needle),
        );
        let result = self.tab.evaluate(&script, false).map_err(AppError::browser)?;
        Ok(matches!(result.value, Some(serde_json::Value::Bool(true))))
    }

    fn hrefs_matching(&self, selector: &str) -> Result<Vec<String>> {
        // Serialize in the page and deserialize here; attribute reads per
        // element would cost one round-trip each.
        let script = format!(
            "JSON.stringify(Array.from(document.querySelectorAll({selector}))\
             .map(e => e.href || '').filter(h => h))",
            selector = js_string(selector),
        );
        let result = self.tab.evaluate(&script, false).map_err(AppError::browser)?;
        match result.value {
            Some(serde_json::Value::String(json)) => Ok(serde_json::from_str(&json)?),
            _ => Ok(Vec::new()),
        }
    }
}

/// Quote a Rust string as a JavaScript string literal.
fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
