//! Filesystem loader: builds a [`NavTree`] from the site root directory.
//!
//! The layout convention is two levels of directories under the root. Each
//! top-level directory becomes a structure; each of its subdirectories
//! becomes a base holding the pages its config file declares, or a single
//! structure-level page when the config sets `page_itself`. Loading never
//! fails: a missing root or broken config degrades to an empty or partial
//! tree with a warning, so one bad directory cannot take the site down.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use waymark_config::DirConfig;

use crate::locale::Translator;
use crate::tree::{NavTree, NavTreeBuilder};

/// Builds the navigation tree from the on-disk site layout.
pub struct TreeLoader<'a> {
    root: PathBuf,
    config_filename: String,
    languages: &'a [String],
    translator: &'a dyn Translator,
    handler_keys: BTreeSet<String>,
}

impl<'a> TreeLoader<'a> {
    /// Create a loader for `root`, reading `config_filename` in each
    /// directory.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        config_filename: &str,
        languages: &'a [String],
        translator: &'a dyn Translator,
    ) -> Self {
        Self {
            root: root.into(),
            config_filename: config_filename.to_owned(),
            languages,
            translator,
            handler_keys: BTreeSet::new(),
        }
    }

    /// Declare the handler keys pages may bind to.
    #[must_use]
    pub fn with_handler_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handler_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Walk the site root and build the tree.
    ///
    /// A missing root yields an empty tree with a warning. Top-level
    /// directories are visited in name order; their subdirectories follow
    /// the `order` list from the structure's config, falling back to name
    /// order when no list is given. Order entries without a matching
    /// directory are logged and skipped.
    #[must_use]
    pub fn load(&self) -> NavTree {
        let mut builder =
            NavTreeBuilder::new(self.languages, self.translator).with_handler_keys(
                self.handler_keys.iter().cloned(),
            );

        if !self.root.is_dir() {
            tracing::warn!(root = %self.root.display(), "Site root does not exist, navigation is empty");
            return builder.build();
        }

        for dir in sorted_subdirs(&self.root) {
            self.load_structure(&mut builder, &dir);
        }

        let tree = builder.build();
        tracing::info!(
            root = %self.root.display(),
            nodes = tree.len(),
            "Navigation tree built"
        );
        tree
    }

    /// Load one top-level directory as a structure with its children.
    fn load_structure(&self, builder: &mut NavTreeBuilder<'_>, dir: &Path) {
        let config = DirConfig::load(dir, &self.config_filename);
        let structure = builder.add_structure(&config.name);

        let children = if config.order.is_empty() {
            sorted_subdirs(dir)
        } else {
            config
                .order
                .iter()
                .filter_map(|name| {
                    let child = dir.join(name);
                    if child.is_dir() {
                        Some(child)
                    } else {
                        tracing::warn!(
                            structure = %config.name,
                            entry = %name,
                            "Ordered entry has no matching directory, skipping"
                        );
                        None
                    }
                })
                .collect()
        };

        for child in children {
            let child_config = DirConfig::load(&child, &self.config_filename);
            if child_config.page_itself {
                builder.add_page(structure, &child_config.name, true);
            } else {
                let base =
                    builder.add_base(structure, &child_config.name, child_config.exclusive_to);
                for page in &child_config.pages {
                    builder.add_page(base, page, true);
                }
                for page in &child_config.hidden_pages {
                    builder.add_page(base, page, false);
                }
            }
        }
    }
}

/// Subdirectories of `dir` in name order, skipping dot-directories.
///
/// Unreadable directories are logged and treated as empty.
fn sorted_subdirs(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Cannot read directory");
            return Vec::new();
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && !path
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with('.'))
        })
        .collect();
    dirs.sort();
    dirs
}
