//! Configuration management for Waymark.
//!
//! Two kinds of configuration live here:
//!
//! - [`Config`]: the application configuration parsed from `waymark.toml`,
//!   with auto-discovery in parent directories and CLI overrides via
//!   [`CliSettings`].
//! - [`DirConfig`]: the per-directory navigation configuration parsed from a
//!   conventionally named file (`nav.toml` by default) inside each directory
//!   of the site root. Missing or broken files degrade to defaults so that a
//!   misplaced file never takes the whole site down.

mod dir;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use dir::DirConfig;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override site root directory.
    pub root_dir: Option<PathBuf>,
    /// Override default language.
    pub default_language: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "waymark.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Internationalization configuration.
    pub i18n: I18nConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7474,
        }
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    root_dir: Option<String>,
    config_filename: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Root directory holding the navigation structure.
    pub root_dir: PathBuf,
    /// Filename of the per-directory navigation config.
    pub config_filename: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("site"),
            config_filename: "nav.toml".to_owned(),
        }
    }
}

/// Internationalization configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Language codes the site is rendered in.
    pub languages: Vec<String>,
    /// Language used when a request carries no language selection.
    pub default_language: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_owned()],
            default_language: "en".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `waymark.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(root_dir) = &settings.root_dir {
            self.site_resolved.root_dir.clone_from(root_dir);
        }
        if let Some(lang) = &settings.default_language {
            self.i18n.default_language.clone_from(lang);
            if !self.i18n.languages.contains(lang) {
                self.i18n.languages.push(lang.clone());
            }
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfigRaw::default(),
            i18n: I18nConfig::default(),
            site_resolved: SiteConfig {
                root_dir: base.join("site"),
                config_filename: "nav.toml".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve raw string paths to absolute paths relative to the config dir.
    ///
    /// Supports `~` expansion via shellexpand.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let root_dir = match &self.site.root_dir {
            Some(raw) => {
                let expanded = shellexpand::tilde(raw);
                let path = PathBuf::from(expanded.as_ref());
                if path.is_absolute() {
                    path
                } else {
                    config_dir.join(path)
                }
            }
            None => config_dir.join("site"),
        };

        self.site_resolved = SiteConfig {
            root_dir,
            config_filename: self
                .site
                .config_filename
                .clone()
                .unwrap_or_else(|| "nav.toml".to_owned()),
        };
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Validation(
                "server.host cannot be empty".to_owned(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }
        if self.i18n.languages.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.languages cannot be empty".to_owned(),
            ));
        }
        if !self.i18n.languages.contains(&self.i18n.default_language) {
            return Err(ConfigError::Validation(format!(
                "i18n.default_language '{}' is not listed in i18n.languages",
                self.i18n.default_language
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7474);
        assert_eq!(config.i18n.languages, vec!["en".to_owned()]);
        assert_eq!(config.i18n.default_language, "en");
        assert_eq!(config.site_resolved.config_filename, "nav.toml");
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let result = Config::load(Some(Path::new("/nonexistent/waymark.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("waymark.toml");
        fs::write(
            &config_path,
            r#"
[server]
host = "0.0.0.0"
port = 8080

[site]
root_dir = "pages"

[i18n]
languages = ["en", "fi"]
default_language = "fi"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.site_resolved.root_dir, temp_dir.path().join("pages"));
        assert_eq!(config.i18n.default_language, "fi");
    }

    #[test]
    fn test_load_absolute_root_dir_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("waymark.toml");
        fs::write(&config_path, "[site]\nroot_dir = \"/srv/site\"\n").unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.site_resolved.root_dir, PathBuf::from("/srv/site"));
    }

    #[test]
    fn test_cli_settings_override_file_values() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("waymark.toml");
        fs::write(&config_path, "[server]\nhost = \"0.0.0.0\"\nport = 8080\n").unwrap();

        let settings = CliSettings {
            host: Some("localhost".to_owned()),
            port: Some(9000),
            root_dir: Some(PathBuf::from("/tmp/site")),
            default_language: None,
        };
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.site_resolved.root_dir, PathBuf::from("/tmp/site"));
    }

    #[test]
    fn test_cli_default_language_added_to_languages() {
        let settings = CliSettings {
            default_language: Some("sv".to_owned()),
            ..CliSettings::default()
        };
        let mut config = Config::default();
        config.apply_cli_settings(&settings);

        assert_eq!(config.i18n.default_language, "sv");
        assert!(config.i18n.languages.contains(&"sv".to_owned()));
    }

    #[test]
    fn test_validate_rejects_unlisted_default_language() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("waymark.toml");
        fs::write(
            &config_path,
            "[i18n]\nlanguages = [\"en\"]\ndefault_language = \"fi\"\n",
        )
        .unwrap();

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("waymark.toml");
        fs::write(&config_path, "[server]\nhost = \"\"\n").unwrap();

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_parse_error_propagates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("waymark.toml");
        fs::write(&config_path, "not valid toml [").unwrap();

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
