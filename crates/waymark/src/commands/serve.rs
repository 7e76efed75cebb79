//! `waymark serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use waymark_config::{CliSettings, Config};
use waymark_server::{SiteServices, run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover waymark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root directory (overrides config).
    #[arg(short, long)]
    root_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Default language (overrides config).
    #[arg(short, long)]
    language: Option<String>,

    /// Enable verbose output (show tree build and request logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            root_dir: self.root_dir,
            default_language: self.language,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Print startup info
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Site root: {}",
            config.site_resolved.root_dir.display()
        ));
        output.info(&format!(
            "Languages: {} (default: {})",
            config.i18n.languages.join(", "),
            config.i18n.default_language
        ));

        if !config.site_resolved.root_dir.is_dir() {
            output.warning(&format!(
                "Site root {} does not exist, navigation will be empty",
                config.site_resolved.root_dir.display()
            ));
        }

        // Build server config and run
        let server_config = server_config_from_config(&config);
        run_server(server_config, SiteServices::default())
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
