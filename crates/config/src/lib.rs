//! Configuration management for folio.
//!
//! Loads and saves `config.toml` from the XDG config directory, filling
//! missing keys with defaults and rewriting the file in normalized form.

mod settings;
mod xdg;

pub use settings::{
    AdminSettings, Config, GeneralSettings, LoggingSettings, SearchSettings, StorageSettings,
};
pub use xdg::{get_config_dir, get_data_dir, get_log_file_path};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const THEME_ID: &str = "dark";
    pub const BASE_URL: &str = "http://localhost:3000/";
    pub const STORAGE_FILE_NAME: &str = "storage.json";
    pub const STORAGE_LIMIT_BYTES: u64 = 5 * 1024 * 1024;
    pub const MAX_CUSTOM_THEMES: usize = 10;
    pub const MAX_THEME_HISTORY: usize = 5;
    pub const MAX_SEARCH_HISTORY: usize = 20;
    pub const RECENT_SEARCHES: usize = 10;
    pub const ADMIN_TOKEN_ENV: &str = "ADMIN_TOKEN";
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const LOG_MAX_ENTRIES: usize = 500;
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// On first run, creates the config file with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if absent.
    ///
    /// Missing keys are completed with defaults and the normalized file is
    /// written back when it differs from what was read.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&original_content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Path of the key-value storage file.
    ///
    /// Uses `storage.file_path` when set, otherwise the data directory.
    pub fn storage_file_path(&self) -> Result<PathBuf> {
        match &self.storage.file_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(get_data_dir()?.join(defaults::STORAGE_FILE_NAME)),
        }
    }

    /// Admin secret from the config file, falling back to `ADMIN_TOKEN`.
    pub fn admin_token(&self) -> Option<String> {
        self.admin
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var(defaults::ADMIN_TOKEN_ENV).ok())
            .filter(|t| !t.is_empty())
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.general.default_theme, defaults::THEME_ID);
        assert_eq!(config.storage.max_custom_themes, defaults::MAX_CUSTOM_THEMES);
    }

    #[test]
    fn test_missing_keys_are_completed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\ndefault_theme = \"light\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.default_theme, "light");
        assert_eq!(config.search.max_history, defaults::MAX_SEARCH_HISTORY);

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("[storage]"));
        assert!(rewritten.contains("limit_bytes"));
    }

    #[test]
    fn test_storage_file_override() {
        let mut config = Config::default();
        config.storage.file_path = Some("/tmp/folio-test.json".into());
        assert_eq!(
            config.storage_file_path().unwrap(),
            PathBuf::from("/tmp/folio-test.json")
        );
    }

    #[test]
    fn test_validate_content_rejects_bad_types() {
        assert!(Config::validate_content("[storage]\nlimit_bytes = \"big\"\n").is_err());
        assert!(Config::validate_content("").is_ok());
    }

    #[test]
    fn test_admin_token_from_config() {
        let mut config = Config::default();
        config.admin.token = Some("s3cret".into());
        assert_eq!(config.admin_token().as_deref(), Some("s3cret"));
    }
}
