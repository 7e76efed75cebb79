//! Navigation tree with per-language URL derivation and path resolution.
//!
//! Nodes are stored in a flat `Vec<Node>` with parent/children relationships
//! tracked by indices. URLs are derived once at build time and indexed for
//! O(1) resolution; the index is populated in depth-first pre-order with
//! first-wins insertion, so a URL that collides across languages or nodes
//! deterministically resolves to the first node in document order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::access::{self, Principal};
use crate::locale::{LocalizedText, Translator};
use crate::slug::slugify;

/// Handle to a node in a [`NavTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Page payload: visibility, handler binding, and derived URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    /// Hidden pages are excluded from menus but still resolvable by path.
    pub visible: bool,
    /// Handler lookup key: the page's source name with spaces replaced by
    /// underscores.
    pub handler_key: String,
    /// Whether a handler was declared for `handler_key` at build time.
    pub has_handler: bool,
    urls: BTreeMap<String, String>,
}

impl PageData {
    /// The page's URL path in `language`, without surrounding slashes.
    #[must_use]
    pub fn url(&self, language: &str) -> Option<&str> {
        self.urls.get(language).map(String::as_str)
    }

    /// All per-language URL paths.
    #[must_use]
    pub fn urls(&self) -> &BTreeMap<String, String> {
        &self.urls
    }
}

/// Node specialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Top-level grouping corresponding to one top-level directory.
    Structure,
    /// Mid-level grouping of pages, optionally access-restricted.
    Base {
        /// Group names allowed access; empty means unrestricted.
        exclusive_to: Vec<String>,
    },
    /// Leaf node representing one navigable endpoint.
    Page(PageData),
}

/// A labeled tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Source name: the directory name for structures and bases, the
    /// configured display name for pages.
    pub name: String,
    /// Per-language display name.
    pub display: LocalizedText,
    /// Node specialization.
    pub kind: NodeKind,
}

impl Node {
    /// Page payload, if this node is a page.
    #[must_use]
    pub fn page(&self) -> Option<&PageData> {
        match &self.kind {
            NodeKind::Page(data) => Some(data),
            _ => None,
        }
    }
}

/// Menu entry for rendering navigation in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title in the requested language.
    pub title: String,
    /// URL path (without surrounding slashes) for pages; `None` for groupings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Child menu entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Immutable navigation tree with O(1) URL path resolution.
///
/// Built once by [`NavTreeBuilder`] (or [`TreeLoader`](crate::TreeLoader))
/// and read-only thereafter; safe to share behind an `Arc`.
pub struct NavTree {
    nodes: Vec<Node>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
    url_index: HashMap<String, usize>,
}

impl NavTree {
    /// Resolve a request path to a node.
    ///
    /// Strips leading and trailing slashes and matches against every
    /// language's URL of every page. Duplicate URLs resolve to the first
    /// node in depth-first pre-order.
    #[must_use]
    pub fn find_node(&self, path: &str) -> Option<NodeId> {
        let path = path.trim_matches('/');
        self.url_index.get(path).map(|&idx| NodeId(idx))
    }

    /// Look up a top-level structure by name.
    #[must_use]
    pub fn structure(&self, name: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .find(|&&idx| self.nodes[idx].name == name)
            .map(|&idx| NodeId(idx))
    }

    /// Top-level structure nodes in document order.
    pub fn structures(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.iter().map(|&idx| NodeId(idx))
    }

    /// Node data for `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Parent of `id`, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0].map(NodeId)
    }

    /// Children of `id` in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.children[id.0].iter().map(|&idx| NodeId(idx)).collect()
    }

    /// Display names of every structure's direct children.
    #[must_use]
    pub fn base_names(&self) -> Vec<&LocalizedText> {
        self.roots
            .iter()
            .flat_map(|&s| self.children[s].iter())
            .map(|&idx| &self.nodes[idx].display)
            .collect()
    }

    /// Display names of every page in the tree.
    #[must_use]
    pub fn page_names(&self) -> Vec<&LocalizedText> {
        self.nodes
            .iter()
            .filter(|node| matches!(node.kind, NodeKind::Page(_)))
            .map(|node| &node.display)
            .collect()
    }

    /// Per-language URL maps of every page, in document order.
    #[must_use]
    pub fn urls(&self) -> Vec<&BTreeMap<String, String>> {
        self.nodes
            .iter()
            .filter_map(|node| node.page().map(PageData::urls))
            .collect()
    }

    /// The canonical URL path of a page in `language`.
    ///
    /// Returns `None` for groupings and for languages the tree was not
    /// built with.
    #[must_use]
    pub fn canonical_url(&self, id: NodeId, language: &str) -> Option<&str> {
        self.nodes[id.0].page()?.url(language)
    }

    /// Effective access restriction of a node.
    ///
    /// A base answers with its own list; a page inherits the nearest base
    /// ancestor's list; structures and structure-level pages are
    /// unrestricted.
    #[must_use]
    pub fn exclusive_to(&self, id: NodeId) -> &[String] {
        match &self.nodes[id.0].kind {
            NodeKind::Structure => &[],
            NodeKind::Base { exclusive_to } => exclusive_to,
            NodeKind::Page(_) => {
                let mut current = self.parents[id.0];
                while let Some(idx) = current {
                    if let NodeKind::Base { exclusive_to } = &self.nodes[idx].kind {
                        return exclusive_to;
                    }
                    current = self.parents[idx];
                }
                &[]
            }
        }
    }

    /// Whether `principal` may access the node.
    ///
    /// Unrestricted nodes admit everyone; restricted nodes require
    /// membership in at least one listed group.
    #[must_use]
    pub fn is_authorized(&self, id: NodeId, principal: &dyn Principal) -> bool {
        access::is_authorized(self.exclusive_to(id), principal)
    }

    /// Menu entries for one structure in one language.
    ///
    /// Hidden pages are excluded; they remain resolvable through
    /// [`find_node`](Self::find_node).
    #[must_use]
    pub fn navigation(&self, structure: &str, language: &str) -> Vec<NavItem> {
        let Some(root) = self.structure(structure) else {
            return Vec::new();
        };

        self.children[root.0]
            .iter()
            .filter_map(|&idx| self.build_nav_item(idx, language))
            .collect()
    }

    /// Build a menu entry for a node, skipping hidden pages.
    fn build_nav_item(&self, idx: usize, language: &str) -> Option<NavItem> {
        let node = &self.nodes[idx];
        let title = node
            .display
            .get(language)
            .unwrap_or(node.name.as_str())
            .to_owned();

        match &node.kind {
            NodeKind::Page(data) => {
                if !data.visible {
                    return None;
                }
                Some(NavItem {
                    title,
                    url: data.url(language).map(str::to_owned),
                    children: Vec::new(),
                })
            }
            NodeKind::Structure | NodeKind::Base { .. } => Some(NavItem {
                title,
                url: None,
                children: self.children[idx]
                    .iter()
                    .filter_map(|&child| self.build_nav_item(child, language))
                    .collect(),
            }),
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builder for constructing [`NavTree`] instances programmatically.
///
/// [`TreeLoader`](crate::TreeLoader) drives this from the filesystem; hosts
/// embedding the tree can also construct it directly.
pub struct NavTreeBuilder<'a> {
    languages: &'a [String],
    translator: &'a dyn Translator,
    handler_keys: BTreeSet<String>,
    nodes: Vec<Node>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
}

impl<'a> NavTreeBuilder<'a> {
    /// Create a builder for the given language list and translator.
    #[must_use]
    pub fn new(languages: &'a [String], translator: &'a dyn Translator) -> Self {
        Self {
            languages,
            translator,
            handler_keys: BTreeSet::new(),
            nodes: Vec::new(),
            children: Vec::new(),
            parents: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Declare the handler keys pages may bind to.
    ///
    /// A page whose key appears here is marked bound at build time; the
    /// rest fall back to the default response.
    #[must_use]
    pub fn with_handler_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handler_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Add a top-level structure node.
    pub fn add_structure(&mut self, name: &str) -> NodeId {
        self.push_node(
            Node {
                name: name.to_owned(),
                display: LocalizedText::new(name, self.languages, self.translator),
                kind: NodeKind::Structure,
            },
            None,
        )
    }

    /// Add a base (grouping) node under a structure.
    pub fn add_base(&mut self, parent: NodeId, name: &str, exclusive_to: Vec<String>) -> NodeId {
        self.push_node(
            Node {
                name: name.to_owned(),
                display: LocalizedText::new(name, self.languages, self.translator),
                kind: NodeKind::Base { exclusive_to },
            },
            Some(parent),
        )
    }

    /// Add a page under a base or directly under a structure.
    pub fn add_page(&mut self, parent: NodeId, name: &str, visible: bool) -> NodeId {
        let display = LocalizedText::new(name, self.languages, self.translator);
        let urls = self.derive_urls(parent, name, &display);
        let handler_key = name.replace(' ', "_");
        let has_handler = self.handler_keys.contains(&handler_key);

        self.push_node(
            Node {
                name: name.to_owned(),
                display,
                kind: NodeKind::Page(PageData {
                    visible,
                    handler_key,
                    has_handler,
                    urls,
                }),
            },
            Some(parent),
        )
    }

    /// Derive the page's URL path in every language: the structure segment
    /// (directory name, untranslated), slugified translated base names on
    /// the way down, then the slugified translated own name.
    fn derive_urls(
        &self,
        parent: NodeId,
        name: &str,
        display: &LocalizedText,
    ) -> BTreeMap<String, String> {
        // Ancestor chain, root first
        let mut chain = Vec::new();
        let mut current = Some(parent.0);
        while let Some(idx) = current {
            chain.push(idx);
            current = self.parents[idx];
        }
        chain.reverse();

        self.languages
            .iter()
            .map(|lang| {
                let mut segments: Vec<String> = chain
                    .iter()
                    .map(|&idx| {
                        let ancestor = &self.nodes[idx];
                        match ancestor.kind {
                            NodeKind::Structure => ancestor.name.clone(),
                            _ => slugify(ancestor.display.get(lang).unwrap_or(&ancestor.name)),
                        }
                    })
                    .collect();
                segments.push(slugify(display.get(lang).unwrap_or(name)));
                (lang.clone(), segments.join("/"))
            })
            .collect()
    }

    fn push_node(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.children.push(Vec::new());
        self.parents.push(parent.map(|p| p.0));

        if let Some(parent) = parent {
            self.children[parent.0].push(idx);
        } else {
            self.roots.push(idx);
        }

        NodeId(idx)
    }

    /// Build the [`NavTree`], indexing page URLs in depth-first pre-order
    /// with first-wins insertion.
    #[must_use]
    pub fn build(self) -> NavTree {
        let mut url_index = HashMap::new();

        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            if let NodeKind::Page(data) = &self.nodes[idx].kind {
                for url in data.urls.values() {
                    url_index.entry(url.clone()).or_insert(idx);
                }
            }
            stack.extend(self.children[idx].iter().rev());
        }

        NavTree {
            nodes: self.nodes,
            children: self.children,
            parents: self.parents,
            roots: self.roots,
            url_index,
        }
    }
}

#[cfg(test)]
mod tests {
    // The tree is shared across request handlers behind an Arc
    static_assertions::assert_impl_all!(super::NavTree: Send, Sync);

    use pretty_assertions::assert_eq;

    use crate::access::GroupSet;
    use crate::locale::{NoTranslation, StaticCatalog};

    use super::*;

    fn languages() -> Vec<String> {
        vec!["en".to_owned(), "fi".to_owned()]
    }

    /// The planning fixture: structure "planning" with ordered bases "day"
    /// and "week", each containing page "browse".
    fn planning_tree(languages: &[String], translator: &dyn Translator) -> NavTree {
        let mut builder = NavTreeBuilder::new(languages, translator);
        let planning = builder.add_structure("planning");
        let day = builder.add_base(planning, "day", Vec::new());
        builder.add_page(day, "browse", true);
        let week = builder.add_base(planning, "week", Vec::new());
        builder.add_page(week, "browse", true);
        builder.build()
    }

    #[test]
    fn test_find_node_resolves_planning_pages() {
        let languages = languages();
        let tree = planning_tree(&languages, &NoTranslation);

        let day_browse = tree.find_node("/planning/day/browse/").unwrap();
        let week_browse = tree.find_node("/planning/week/browse/").unwrap();

        assert_ne!(day_browse, week_browse);
        assert_eq!(
            tree.canonical_url(day_browse, "en"),
            Some("planning/day/browse")
        );
        assert_eq!(
            tree.canonical_url(week_browse, "en"),
            Some("planning/week/browse")
        );
    }

    #[test]
    fn test_find_node_strips_slashes() {
        let languages = languages();
        let tree = planning_tree(&languages, &NoTranslation);

        let with_slashes = tree.find_node("/planning/day/browse/");
        let without = tree.find_node("planning/day/browse");

        assert_eq!(with_slashes, without);
        assert!(with_slashes.is_some());
    }

    #[test]
    fn test_find_node_unknown_path_returns_none() {
        let languages = languages();
        let tree = planning_tree(&languages, &NoTranslation);

        assert!(tree.find_node("/planning/month/browse/").is_none());
        assert!(tree.find_node("/").is_none());
    }

    #[test]
    fn test_localized_urls_resolve_to_same_node() {
        let languages = languages();
        let catalog = StaticCatalog::new()
            .with("fi", "day", "päivä")
            .with("fi", "browse", "selaa");
        let tree = planning_tree(&languages, &catalog);

        let en = tree.find_node("planning/day/browse").unwrap();
        let fi = tree.find_node("planning/paiva/selaa").unwrap();

        assert_eq!(en, fi);
        assert_eq!(tree.canonical_url(en, "fi"), Some("planning/paiva/selaa"));
    }

    #[test]
    fn test_page_itself_url_excludes_base_segment() {
        let languages = languages();
        let mut builder = NavTreeBuilder::new(&languages, &NoTranslation);
        let control = builder.add_structure("control");
        builder.add_page(control, "logout", true);
        let tree = builder.build();

        let logout = tree.find_node("control/logout").unwrap();
        assert_eq!(tree.canonical_url(logout, "en"), Some("control/logout"));
    }

    #[test]
    fn test_url_derivation_idempotent() {
        let languages = languages();
        let catalog = StaticCatalog::new().with("fi", "browse", "selaa");

        let first = planning_tree(&languages, &catalog);
        let second = planning_tree(&languages, &catalog);

        assert_eq!(first.urls(), second.urls());
    }

    #[test]
    fn test_duplicate_urls_first_in_preorder_wins() {
        let languages = vec!["en".to_owned()];
        let mut builder = NavTreeBuilder::new(&languages, &NoTranslation);
        let s = builder.add_structure("s");
        let b = builder.add_base(s, "b", Vec::new());
        let first = builder.add_page(b, "page", true);
        let _second = builder.add_page(b, "page", true);
        let tree = builder.build();

        assert_eq!(tree.find_node("s/b/page"), Some(first));
    }

    #[test]
    fn test_hidden_page_resolvable_but_not_in_menu() {
        let languages = languages();
        let mut builder = NavTreeBuilder::new(&languages, &NoTranslation);
        let planning = builder.add_structure("planning");
        let day = builder.add_base(planning, "day", Vec::new());
        builder.add_page(day, "browse", true);
        builder.add_page(day, "audit", false);
        let tree = builder.build();

        assert!(tree.find_node("planning/day/audit").is_some());

        let items = tree.navigation("planning", "en");
        assert_eq!(items.len(), 1);
        let titles: Vec<_> = items[0].children.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["browse"]);
    }

    #[test]
    fn test_exclusive_to_inherited_by_descendant_pages() {
        let languages = languages();
        let mut builder = NavTreeBuilder::new(&languages, &NoTranslation);
        let planning = builder.add_structure("planning");
        let day = builder.add_base(planning, "day", vec!["planners".to_owned()]);
        let browse = builder.add_page(day, "browse", true);
        let edit = builder.add_page(day, "edit", false);
        let tree = builder.build();

        assert_eq!(tree.exclusive_to(day), ["planners".to_owned()]);
        assert_eq!(tree.exclusive_to(browse), ["planners".to_owned()]);
        assert_eq!(tree.exclusive_to(edit), ["planners".to_owned()]);
        assert_eq!(tree.exclusive_to(planning), Vec::<String>::new());
    }

    #[test]
    fn test_structure_level_page_unrestricted() {
        let languages = languages();
        let mut builder = NavTreeBuilder::new(&languages, &NoTranslation);
        let control = builder.add_structure("control");
        let logout = builder.add_page(control, "logout", true);
        let tree = builder.build();

        assert_eq!(tree.exclusive_to(logout), Vec::<String>::new());
        assert!(tree.is_authorized(logout, &GroupSet::empty()));
    }

    #[test]
    fn test_is_authorized_requires_listed_group() {
        let languages = languages();
        let mut builder = NavTreeBuilder::new(&languages, &NoTranslation);
        let planning = builder.add_structure("planning");
        let day = builder.add_base(planning, "day", vec!["planners".to_owned()]);
        let browse = builder.add_page(day, "browse", true);
        let tree = builder.build();

        assert!(!tree.is_authorized(browse, &GroupSet::empty()));
        assert!(!tree.is_authorized(browse, &GroupSet::new(["guests"])));
        assert!(tree.is_authorized(browse, &GroupSet::new(["planners"])));
    }

    #[test]
    fn test_structure_lookup() {
        let languages = languages();
        let tree = planning_tree(&languages, &NoTranslation);

        let planning = tree.structure("planning");
        assert!(planning.is_some());
        assert_eq!(tree.node(planning.unwrap()).name, "planning");
        assert!(tree.structure("missing").is_none());
    }

    #[test]
    fn test_base_and_page_names() {
        let languages = languages();
        let tree = planning_tree(&languages, &NoTranslation);

        let base_names: Vec<_> = tree
            .base_names()
            .iter()
            .filter_map(|n| n.get("en"))
            .collect();
        assert_eq!(base_names, vec!["day", "week"]);

        assert_eq!(tree.page_names().len(), 2);
    }

    #[test]
    fn test_urls_lists_every_page() {
        let languages = languages();
        let tree = planning_tree(&languages, &NoTranslation);

        let urls = tree.urls();
        assert_eq!(urls.len(), 2);
        assert_eq!(
            urls[0].get("en").map(String::as_str),
            Some("planning/day/browse")
        );
    }

    #[test]
    fn test_navigation_localizes_titles_and_urls() {
        let languages = languages();
        let catalog = StaticCatalog::new()
            .with("fi", "day", "Päivä")
            .with("fi", "browse", "Selaa");
        let tree = planning_tree(&languages, &catalog);

        let items = tree.navigation("planning", "fi");

        assert_eq!(items[0].title, "Päivä");
        assert_eq!(items[0].children[0].title, "Selaa");
        assert_eq!(
            items[0].children[0].url.as_deref(),
            Some("planning/paiva/selaa")
        );
    }

    #[test]
    fn test_navigation_unknown_structure_is_empty() {
        let languages = languages();
        let tree = planning_tree(&languages, &NoTranslation);

        assert!(tree.navigation("missing", "en").is_empty());
    }

    #[test]
    fn test_nav_item_serialization_skips_empty_fields() {
        let item = NavItem {
            title: "day".to_owned(),
            url: None,
            children: Vec::new(),
        };

        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["title"], "day");
        assert!(json.get("url").is_none());
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_handler_binding_resolved_at_build() {
        let languages = languages();
        let mut builder = NavTreeBuilder::new(&languages, &NoTranslation)
            .with_handler_keys(["browse_week".to_owned()]);
        let planning = builder.add_structure("planning");
        let week = builder.add_base(planning, "week", Vec::new());
        let bound = builder.add_page(week, "browse week", true);
        let unbound = builder.add_page(week, "summary", true);
        let tree = builder.build();

        let bound_page = tree.node(bound).page().unwrap();
        assert_eq!(bound_page.handler_key, "browse_week");
        assert!(bound_page.has_handler);

        let unbound_page = tree.node(unbound).page().unwrap();
        assert_eq!(unbound_page.handler_key, "summary");
        assert!(!unbound_page.has_handler);
    }

    #[test]
    fn test_empty_tree() {
        let languages = languages();
        let tree = NavTreeBuilder::new(&languages, &NoTranslation).build();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.find_node("/anything/").is_none());
        assert!(tree.base_names().is_empty());
    }
}
