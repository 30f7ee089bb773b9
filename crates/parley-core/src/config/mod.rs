mod defaults;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ParleyError;
use crate::locale::Locale;
use defaults::*;

/// Top-level Parley configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

/// Translation bundles and locale fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Process-wide default locale, tried after any context override.
    #[serde(default = "default_locale")]
    pub default_locale: Locale,
    /// Last-resort locale at the end of every candidate chain.
    #[serde(default = "default_root_locale")]
    pub root_locale: Locale,
    /// Bundle directories, loaded in order. Later directories override earlier ones.
    #[serde(default = "default_bundle_dirs")]
    pub bundle_dirs: Vec<String>,
    /// Load the messages shipped with Parley before any bundle directory.
    #[serde(default = "default_true")]
    pub embedded_defaults: bool,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            root_locale: default_root_locale(),
            bundle_dirs: default_bundle_dirs(),
            embedded_defaults: true,
        }
    }
}

impl I18nConfig {
    /// Bundle directories with `~` expanded.
    pub fn bundle_paths(&self) -> Vec<PathBuf> {
        self.bundle_dirs
            .iter()
            .map(|dir| PathBuf::from(shellexpand(dir)))
            .collect()
    }
}

/// Persisted per-user/channel/guild locale preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            db_path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, ParleyError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ParleyError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, ParleyError> {
    toml::from_str(content).map_err(|e| ParleyError::Config(format!("failed to parse config: {e}")))
}
