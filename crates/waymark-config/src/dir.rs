//! Per-directory navigation configuration.
//!
//! Each directory under the site root may carry a declarative config file
//! (`nav.toml` by default) describing the pages it contributes to the
//! navigation tree. The loader never fails: a directory without a config
//! file gets defaults, and a file that cannot be read or parsed is logged
//! and treated as absent so the rest of the site still builds.

use std::path::Path;

use serde::Deserialize;

/// Declarative navigation options for one directory.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DirConfig {
    /// Display names of visible pages in this directory.
    pub pages: Vec<String>,
    /// Display names of pages excluded from menus but still resolvable.
    pub hidden_pages: Vec<String>,
    /// Subdirectory names defining traversal order.
    pub order: Vec<String>,
    /// Group names allowed to access this directory's pages.
    pub exclusive_to: Vec<String>,
    /// The directory is itself a single page rather than a grouping.
    pub page_itself: bool,

    /// Directory name, derived from the path (set after loading).
    #[serde(skip)]
    pub name: String,
}

impl DirConfig {
    /// Load the navigation config for `dir`.
    ///
    /// `config_filename` is the conventional file name, e.g. `nav.toml`.
    /// Missing files yield defaults silently; unreadable or unparsable files
    /// are logged and also yield defaults.
    #[must_use]
    pub fn load(dir: &Path, config_filename: &str) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let path = dir.join(config_filename);
        let mut config = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str::<Self>(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Invalid directory config, using defaults");
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Unreadable directory config, using defaults");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.name = name;
        config
    }
}
