//! HTTP request handlers.

pub(crate) mod navigation;
pub(crate) mod pages;

use serde::Deserialize;

/// Language selection query parameter, shared by all routes.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LangQuery {
    /// Requested language code; unconfigured codes fall back to the default.
    pub(crate) lang: Option<String>,
}

/// Convert internal path (without surrounding slashes) to URL path.
///
/// The tree stores paths without slashes (e.g. "planning/day/browse"), but
/// links and redirects use the slash-wrapped form ("/planning/day/browse/").
pub(crate) fn to_url_path(path: &str) -> String {
    format!("/{path}/")
}

/// Escape text for embedding in HTML.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
