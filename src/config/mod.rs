//! Configuration management for Tributary.
//!
//! Configuration is read from `~/.config/tributary/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod keybindings;

pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::fetcher::route::URL_PLACEHOLDER;
use crate::fetcher::Route;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transport routes, tried in order.
    pub routes: Vec<Route>,
    pub http: HttpConfig,
    pub storage: StorageConfig,
    pub keybindings: KeybindingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes: Route::defaults(),
            http: HttpConfig::default(),
            storage: StorageConfig::default(),
            keybindings: KeybindingConfig::default(),
        }
    }
}

/// Settings handed to the HTTP client. The timeout here is the only one
/// applied to a route attempt.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "tributary/0.1.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file; defaults to `<data_dir>/tributary/tributary.db`.
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/tributary/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tributary").join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.routes.is_empty() {
            return Err(ConfigError::Invalid("at least one route is required".into()));
        }
        if let Some(route) = self
            .routes
            .iter()
            .find(|r| !r.template.contains(URL_PLACEHOLDER))
        {
            return Err(ConfigError::Invalid(format!(
                "route `{}` has no {} placeholder",
                route.name, URL_PLACEHOLDER
            )));
        }
        Ok(())
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Tributary Configuration
#
# Routes are tried in order until one returns a usable response.
# `{url}` in a template is replaced with the query-encoded feed URL.
# Envelopes:
# - { kind = "json", field = "contents" }: JSON object, feed text in `field`
# - { kind = "raw" }: the response body is the feed text

[[routes]]
name = "allorigins"
template = "https://api.allorigins.win/get?url={url}"
envelope = { kind = "json", field = "contents" }

[[routes]]
name = "codetabs"
template = "https://api.codetabs.com/v1/proxy?quest={url}"
envelope = { kind = "raw" }

[http]
# Per-route request timeout in seconds
timeout_secs = 10
user_agent = "tributary/0.1.0"

[storage]
# Favorites database (default: <data dir>/tributary/tributary.db)
# database_path = "/path/to/tributary.db"

[keybindings]
# Commands for `tributary browse`; each action accepts any listed word
quit = ["q", "quit"]
next_page = ["n", "next"]
prev_page = ["p", "prev"]
search = ["s", "/", "search"]
show_favorites = ["f", "favorites"]
show_all = ["a", "all"]
reload = ["r", "reload"]
toggle_star = ["t", "star"]
open_in_browser = ["o", "open"]
load = ["l", "load"]
help = ["h", "?", "help"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
