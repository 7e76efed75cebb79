//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use waymark_tree::NavTree;

use crate::access::AccessProvider;
use crate::registry::HandlerRegistry;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// The navigation tree, built once at startup.
    pub(crate) tree: Arc<NavTree>,
    /// Page handlers keyed by page name.
    pub(crate) handlers: HandlerRegistry,
    /// Group membership lookup for access restriction.
    pub(crate) access: Arc<dyn AccessProvider>,
    /// Language codes the site is rendered in.
    pub(crate) languages: Vec<String>,
    /// Language used when a request carries no language selection.
    pub(crate) default_language: String,
}

impl AppState {
    /// Resolve the request's language selection, falling back to the
    /// default for missing or unconfigured codes.
    pub(crate) fn select_language<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(lang) if self.languages.iter().any(|l| l.as_str() == lang) => lang,
            _ => &self.default_language,
        }
    }
}
