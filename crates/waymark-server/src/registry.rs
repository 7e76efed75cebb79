//! Page handler registry.
//!
//! Pages bind to handlers by key: the page's name with spaces replaced by
//! underscores. Hosts register their handlers up front; the binding is
//! resolved once when the tree is built, and [`HandlerRegistry::verify`]
//! reports registered handlers no page references.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use waymark_tree::{NavTree, NodeId};

/// Request context passed to a page handler.
pub struct PageContext<'a> {
    /// The navigation tree the request resolved against.
    pub tree: &'a NavTree,
    /// The resolved page node; `None` for the front page.
    pub node: Option<NodeId>,
    /// The language the request selected.
    pub language: &'a str,
}

/// A page handler produces the response for one page.
pub type PageHandler = Arc<dyn Fn(&PageContext<'_>) -> Response + Send + Sync>;

/// Registry key reserved for the front page (the empty path).
pub(crate) const FRONTPAGE_KEY: &str = "frontpage";

/// Handlers keyed by page name.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, PageHandler>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `key`.
    ///
    /// Spaces in the key are replaced by underscores so that keys can be
    /// written exactly like the page names they bind to. Re-registering a
    /// key replaces the previous handler.
    pub fn register<F>(&mut self, key: &str, handler: F)
    where
        F: Fn(&PageContext<'_>) -> Response + Send + Sync + 'static,
    {
        self.handlers
            .insert(key.replace(' ', "_"), Arc::new(handler));
    }

    /// Look up the handler registered under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PageHandler> {
        self.handlers.get(key)
    }

    /// Registered keys in name order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Check the registry against a built tree.
    ///
    /// Logs a warning for every registered handler no page references, and
    /// for every page whose key has no handler (those pages fall back to
    /// the default response). Returns the unreferenced keys.
    pub fn verify(&self, tree: &NavTree) -> Vec<String> {
        let page_keys: Vec<&str> = tree
            .structures()
            .flat_map(|s| collect_page_keys(tree, s))
            .collect();

        for key in &page_keys {
            if !self.handlers.contains_key(*key) {
                tracing::warn!(key = %key, "Page has no registered handler, serving default response");
            }
        }

        let unreferenced: Vec<String> = self
            .handlers
            .keys()
            .filter(|key| *key != FRONTPAGE_KEY && !page_keys.contains(&key.as_str()))
            .cloned()
            .collect();
        for key in &unreferenced {
            tracing::warn!(key = %key, "Registered handler matches no page");
        }
        unreferenced
    }
}

/// Handler keys of every page in the subtree rooted at `id`.
fn collect_page_keys(tree: &NavTree, id: NodeId) -> Vec<&str> {
    let mut keys = Vec::new();
    if let Some(page) = tree.node(id).page() {
        keys.push(page.handler_key.as_str());
    }
    for child in tree.children(id) {
        keys.extend(collect_page_keys(tree, child));
    }
    keys
}
