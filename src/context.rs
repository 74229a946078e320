//! Per-invocation wiring: config, logger and the shared store.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_admin::AdminAuth;
use folio_config::{get_log_file_path, Config};
use folio_logger::LogLevel;
use folio_project_filter::SearchHistory;
use folio_state::ThemeCustomization;
use folio_storage::{FileStore, KeyValueStore, PageLocation, ThemeStorage, ThemeStorageLimits};

/// Everything a command needs, built once in `main`.
pub struct Context {
    pub config: Config,
    store: Arc<dyn KeyValueStore>,
}

impl Context {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self { config, store }
    }

    /// Load config, start the logger and open the store file.
    ///
    /// An explicit `config_path` must load; the default location falls
    /// back to built-in defaults with a warning.
    pub fn load(config_path: Option<&Path>, storage_path: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load().unwrap_or_else(|e| {
                eprintln!("Warning: using default config: {:#}", e);
                Config::default()
            }),
        };

        init_logger(&config);

        let storage_path = match storage_path {
            Some(path) => path,
            None => config.storage_file_path()?,
        };
        folio_logger::debug(format!("Using store {}", storage_path.display()));

        Ok(Self::new(config, Arc::new(FileStore::new(storage_path))))
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    pub fn theme_storage(&self) -> ThemeStorage {
        ThemeStorage::with_limits(
            self.store(),
            ThemeStorageLimits {
                max_custom_themes: self.config.storage.max_custom_themes,
                max_history: self.config.storage.max_theme_history,
            },
        )
    }

    /// Initialized theme session over the shared store.
    pub fn theme_session(&self) -> ThemeCustomization {
        let mut session = ThemeCustomization::new(self.theme_storage())
            .with_default_theme(&self.config.general.default_theme);
        session.initialize();
        session
    }

    pub fn search_history(&self) -> SearchHistory {
        SearchHistory::load_with_limits(
            self.store(),
            self.config.search.max_history,
            self.config.search.recent_display,
        )
    }

    /// Page that share links point at.
    pub fn page_location(&self) -> Result<PageLocation> {
        let base_url = &self.config.general.base_url;
        PageLocation::parse(base_url).ok_or_else(|| anyhow!("Invalid base_url: {}", base_url))
    }

    pub fn admin_auth(&self) -> AdminAuth {
        AdminAuth::new(self.config.admin_token(), self.config.admin.production)
    }

    /// Advisory storage ceiling from config.
    pub fn storage_limit(&self) -> usize {
        usize::try_from(self.config.storage.limit_bytes).unwrap_or(usize::MAX)
    }
}

fn init_logger(config: &Config) {
    let log_path = match &config.logging.file_path {
        Some(path) => Some(PathBuf::from(path)),
        None => get_log_file_path().ok(),
    };
    let min_level = config.logging.min_level.parse().unwrap_or_else(|e| {
        eprintln!("Warning: {}; logging at info", e);
        LogLevel::Info
    });
    folio_logger::init(log_path, config.logging.max_entries, min_level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_storage::MemoryStore;

    #[test]
    fn test_session_uses_configured_limits() {
        let mut config = Config::default();
        config.general.default_theme = "light".into();
        config.storage.max_custom_themes = 2;
        let ctx = Context::new(config, Arc::new(MemoryStore::new()));

        let session = ctx.theme_session();
        assert_eq!(session.current_theme(), "light");
        assert_eq!(session.storage().limits().max_custom_themes, 2);
    }

    #[test]
    fn test_page_location_from_base_url() {
        let mut config = Config::default();
        config.general.base_url = "https://example.com/portfolio".into();
        let ctx = Context::new(config, Arc::new(MemoryStore::new()));
        let location = ctx.page_location().unwrap();
        assert_eq!(location.origin, "https://example.com");
        assert_eq!(location.pathname, "/portfolio");

        let mut config = Config::default();
        config.general.base_url = "not a url".into();
        let ctx = Context::new(config, Arc::new(MemoryStore::new()));
        assert!(ctx.page_location().is_err());
    }

    #[test]
    fn test_load_with_explicit_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let storage_path = dir.path().join("store.json");
        let mut config = Config::default();
        config.logging.file_path = Some(dir.path().join("folio.log").display().to_string());
        config.save_to(&config_path).unwrap();

        let ctx = Context::load(Some(&config_path), Some(storage_path.clone())).unwrap();
        assert!(ctx.config.logging.file_path.is_some());

        ctx.theme_session().set_theme("light");
        assert!(storage_path.exists());
    }
}
