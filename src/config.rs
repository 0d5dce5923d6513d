//! Application configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user `config.toml` in the config directory overrides any
//! subset of keys.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! app_title = "App"          # Suffix of every page title, logo text
//! footer = "© 2024"          # Footer text
//!
//! [api]
//! base_url = "https://dummyjson.com"
//!
//! [posts]
//! page_size = 10             # Posts per listing page
//!
//! [storage]
//! path = ".hashnav-store.json"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [posts]
//! page_size = 5
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Appended to every page title as `"<route> - <app_title>"`.
    pub app_title: String,
    /// Footer text.
    pub footer: String,
    /// Remote post source settings.
    pub api: ApiConfig,
    /// Post listing settings.
    pub posts: PostsConfig,
    /// Local key-value store settings.
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_title: "App".to_string(),
            footer: "© 2024".to_string(),
            api: ApiConfig::default(),
            posts: PostsConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "app_title must not be empty".into(),
            ));
        }
        if self.posts.page_size == 0 {
            return Err(ConfigError::Validation(
                "posts.page_size must be at least 1".into(),
            ));
        }
        let url = self.api.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "api.base_url must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }
}

/// Remote post source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the read-only posts API, without trailing slash.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dummyjson.com".to_string(),
        }
    }
}

/// Post listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostsConfig {
    pub page_size: usize,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

/// Local key-value store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// JSON file backing the store. Relative paths resolve against the
    /// working directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".hashnav-store.json"),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(AppConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(dir = %dir.display(), "loaded config");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# hashnav Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Suffix of every page title ("<Page> - <app_title>") and the logo text.
app_title = "App"

# Footer text.
footer = "© 2024"

# ---------------------------------------------------------------------------
# Remote post source (read-only HTTP JSON)
# ---------------------------------------------------------------------------
[api]
# Serves GET /posts, GET /posts/{id} and GET /posts/{id}/comments.
base_url = "https://dummyjson.com"

# ---------------------------------------------------------------------------
# Post listing
# ---------------------------------------------------------------------------
[posts]
# Number of posts shown per page. Must be at least 1.
page_size = 10

# ---------------------------------------------------------------------------
# Local storage
# ---------------------------------------------------------------------------
[storage]
# JSON file holding the comment list and like/dislike counters.
path = ".hashnav-store.json"
"##
}
