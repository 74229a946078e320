//! Configuration structures for folio settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Key-value storage settings
    #[serde(default)]
    pub storage: StorageSettings,

    /// Project search settings
    #[serde(default)]
    pub search: SearchSettings,

    /// Admin area settings
    #[serde(default)]
    pub admin: AdminSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Theme selected when nothing is stored yet
    #[serde(default = "default_theme_id")]
    pub default_theme: String,

    /// Public page URL used when building share links
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Key-value storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Storage file path (optional, defaults to the data directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Advisory size ceiling in bytes
    #[serde(default = "default_storage_limit_bytes")]
    pub limit_bytes: u64,

    /// Maximum number of stored custom themes
    #[serde(default = "default_max_custom_themes")]
    pub max_custom_themes: usize,

    /// Length of the theme selection history
    #[serde(default = "default_max_theme_history")]
    pub max_theme_history: usize,
}

/// Project search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Persisted search history length
    #[serde(default = "default_max_search_history")]
    pub max_history: usize,

    /// Number of history entries shown as recent searches
    #[serde(default = "default_recent_searches")]
    pub recent_display: usize,
}

/// Admin area settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminSettings {
    /// Shared secret; `ADMIN_TOKEN` is used when unset
    #[serde(default)]
    pub token: Option<String>,

    /// Mark the auth cookie `Secure`
    #[serde(default)]
    pub production: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Number of entries kept in memory
    #[serde(default = "default_log_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_theme_id() -> String {
    defaults::THEME_ID.to_string()
}

fn default_base_url() -> String {
    defaults::BASE_URL.to_string()
}

fn default_storage_limit_bytes() -> u64 {
    defaults::STORAGE_LIMIT_BYTES
}

fn default_max_custom_themes() -> usize {
    defaults::MAX_CUSTOM_THEMES
}

fn default_max_theme_history() -> usize {
    defaults::MAX_THEME_HISTORY
}

fn default_max_search_history() -> usize {
    defaults::MAX_SEARCH_HISTORY
}

fn default_recent_searches() -> usize {
    defaults::RECENT_SEARCHES
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_log_max_entries() -> usize {
    defaults::LOG_MAX_ENTRIES
}

// Default implementations
impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            default_theme: default_theme_id(),
            base_url: default_base_url(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            limit_bytes: default_storage_limit_bytes(),
            max_custom_themes: default_max_custom_themes(),
            max_theme_history: default_max_theme_history(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_history: default_max_search_history(),
            recent_display: default_recent_searches(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_log_max_entries(),
        }
    }
}
