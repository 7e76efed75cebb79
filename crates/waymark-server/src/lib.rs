//! HTTP server for the Waymark navigation engine.
//!
//! Serves a navigation tree built from an on-disk site layout:
//! - Every page URL in every configured language, dispatched to the host's
//!   registered handler or a default response
//! - Redirects to the canonical URL of the selected language
//! - A JSON navigation API for menu rendering
//!
//! # Quick Start
//!
//! ```ignore
//! use waymark_server::{ServerConfig, SiteServices, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7474,
//!         root_dir: "site".into(),
//!         config_filename: "nav.toml".to_string(),
//!         languages: vec!["en".to_string()],
//!         default_language: "en".to_string(),
//!     };
//!
//!     run_server(config, SiteServices::default()).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (waymark-server)
//!                        │
//!                        ├─► /api/navigation ──► NavTree (menu items as JSON)
//!                        │
//!                        └─► /{*path} ──► NavTree::find_node
//!                                │
//!                                ├─► AccessProvider (authorize)
//!                                ├─► canonical URL redirect
//!                                └─► HandlerRegistry dispatch / default page
//! ```

mod access;
mod app;
mod error;
mod handlers;
mod registry;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use waymark_tree::{NoTranslation, Translator, TreeLoader};

pub use access::{AccessProvider, HeaderGroups, NoGroups};
pub use error::ServerError;
pub use registry::{HandlerRegistry, PageContext, PageHandler};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Site root directory holding the navigation structure.
    pub root_dir: PathBuf,
    /// Filename of the per-directory navigation config.
    pub config_filename: String,
    /// Language codes the site is rendered in.
    pub languages: Vec<String>,
    /// Language used when a request carries no language selection.
    pub default_language: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7474,
            root_dir: PathBuf::from("site"),
            config_filename: "nav.toml".to_string(),
            languages: vec!["en".to_string()],
            default_language: "en".to_string(),
        }
    }
}

/// Host-provided services the server dispatches into.
pub struct SiteServices {
    /// Translation of display names into the configured languages.
    pub translator: Arc<dyn Translator>,
    /// Page handlers keyed by page name.
    pub handlers: HandlerRegistry,
    /// Group membership lookup for access restriction.
    pub access: Arc<dyn AccessProvider>,
}

impl Default for SiteServices {
    fn default() -> Self {
        Self {
            translator: Arc::new(NoTranslation),
            handlers: HandlerRegistry::new(),
            access: Arc::new(NoGroups),
        }
    }
}

/// Run the server.
///
/// Builds the navigation tree from `config.root_dir`, verifies the handler
/// registry against it, then serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the server fails to bind or start.
pub async fn run_server(
    config: ServerConfig,
    services: SiteServices,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = TreeLoader::new(
        &config.root_dir,
        &config.config_filename,
        &config.languages,
        services.translator.as_ref(),
    )
    .with_handler_keys(services.handlers.keys().map(str::to_owned))
    .load();

    services.handlers.verify(&tree);

    let state = Arc::new(AppState {
        tree: Arc::new(tree),
        handlers: services.handlers,
        access: services.access,
        languages: config.languages.clone(),
        default_language: config.default_language.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Waymark config.
#[must_use]
pub fn server_config_from_config(config: &waymark_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        root_dir: config.site_resolved.root_dir.clone(),
        config_filename: config.site_resolved.config_filename.clone(),
        languages: config.i18n.languages.clone(),
        default_language: config.i18n.default_language.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_config_defaults() {
        let config = waymark_config::Config::default();
        let server_config = server_config_from_config(&config);

        assert_eq!(server_config.host, "127.0.0.1");
        assert_eq!(server_config.port, 7474);
        assert_eq!(server_config.config_filename, "nav.toml");
        assert_eq!(server_config.languages, vec!["en".to_string()]);
        assert_eq!(server_config.default_language, "en");
    }
}
