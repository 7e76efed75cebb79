//! `waymark tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use waymark_config::{CliSettings, Config};
use waymark_tree::{NavTree, NoTranslation, NodeId, NodeKind, TreeLoader};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Path to configuration file (default: auto-discover waymark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root directory (overrides config).
    #[arg(short, long)]
    root_dir: Option<PathBuf>,

    /// Also list every URL of every page in every language.
    #[arg(short, long)]
    urls: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root_dir: self.root_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let tree = TreeLoader::new(
            &config.site_resolved.root_dir,
            &config.site_resolved.config_filename,
            &config.i18n.languages,
            &NoTranslation,
        )
        .load();

        if tree.is_empty() {
            output.warning("Navigation tree is empty");
            return Ok(());
        }

        for structure in tree.structures() {
            output.highlight(&tree.node(structure).name);
            print_subtree(&output, &tree, structure, 1);
        }

        if self.urls {
            output.info("");
            output.highlight("URLs");
            for urls in tree.urls() {
                for (language, url) in urls {
                    output.info(&format!("  [{language}] /{url}/"));
                }
            }
        }

        Ok(())
    }
}

/// Print the children of `id`, indented one level per depth.
fn print_subtree(output: &Output, tree: &NavTree, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    for child in tree.children(id) {
        let node = tree.node(child);
        match &node.kind {
            NodeKind::Page(page) => {
                let mut flags = Vec::new();
                if !page.visible {
                    flags.push("hidden");
                }
                if page.has_handler {
                    flags.push("handler");
                }
                let suffix = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", flags.join(", "))
                };
                output.info(&format!("{indent}{}{suffix}", node.name));
            }
            NodeKind::Base { exclusive_to } => {
                let suffix = if exclusive_to.is_empty() {
                    String::new()
                } else {
                    format!(" [restricted: {}]", exclusive_to.join(", "))
                };
                output.info(&format!("{indent}{}{suffix}", node.name));
                print_subtree(output, tree, child, depth + 1);
            }
            NodeKind::Structure => {
                output.info(&format!("{indent}{}", node.name));
                print_subtree(output, tree, child, depth + 1);
            }
        }
    }
}
