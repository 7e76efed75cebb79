//! Navigation tree structure and path resolution for Waymark.
//!
//! Provides [`NavTree`], an immutable in-memory tree of navigable nodes built
//! from a site's on-disk directory layout, with per-language URL derivation
//! and request-path resolution.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec` with parent/children relationships
//! tracked by indices and addressed through [`NodeId`] handles. Three node
//! kinds exist:
//!
//! - **Structure**: one per top-level directory, a plain grouping.
//! - **Base**: a mid-level grouping of pages, optionally access-restricted.
//! - **Page**: a leaf with per-language URLs and an optional bound handler key.
//!
//! The tree is built once by [`TreeLoader`] (or programmatically via
//! [`NavTreeBuilder`]) and treated as read-only thereafter, so it can be
//! shared across request handlers behind an `Arc` without locking.

mod access;
mod builder;
mod locale;
mod slug;
mod tree;

pub use access::{GroupSet, Principal};
pub use builder::TreeLoader;
pub use locale::{LocalizedText, NoTranslation, StaticCatalog, Translator};
pub use slug::slugify;
pub use tree::{NavItem, NavTree, NavTreeBuilder, Node, NodeId, NodeKind, PageData};
