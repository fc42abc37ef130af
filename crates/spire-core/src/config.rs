use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SpireError;

/// Top-level Spire configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spire: SpireConfig,
    #[serde(default)]
    pub languages: LanguagesConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub piece_defaults: PieceDefaults,
}

/// General framework settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpireConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Root of user pieces (`{data_dir}/languages/*.toml`).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Root of the bundled core pieces.
    #[serde(default = "default_core_dir")]
    pub core_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for daily log files. Empty = stderr only.
    #[serde(default)]
    pub log_dir: String,
}

impl Default for SpireConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            core_dir: default_core_dir(),
            log_level: default_log_level(),
            log_dir: String::new(),
        }
    }
}

/// Language store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesConfig {
    /// Name of the language every other language falls back to.
    #[serde(default = "default_language")]
    pub default: String,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            default: default_language(),
        }
    }
}

/// How the event store removes host listeners when an event is unregistered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerCleanup {
    /// Remove only the listener the store installed (default).
    #[default]
    Owned,
    /// Remove every listener registered under the event name, whoever owns it.
    All,
}

/// Event store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default)]
    pub listener_cleanup: ListenerCleanup,
}

/// Defaults merged under every piece's own options, per store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PieceDefaults {
    #[serde(default)]
    pub languages: LanguageDefaults,
}

/// Default options for language pieces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageDefaults {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LanguageDefaults {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// --- Default value functions ---

fn default_name() -> String {
    "Spire".to_string()
}
fn default_data_dir() -> String {
    "~/.spire".to_string()
}
fn default_core_dir() -> String {
    "~/.spire/core".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_language() -> String {
    "en-US".to_string()
}
fn default_true() -> bool {
    true
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
pub fn load(path: &str) -> Result<Config, SpireError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| SpireError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| SpireError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
