//! Persistence of the current theme, custom themes and theme history.
//!
//! Every storage failure is logged and reported as `false`, `None` or an
//! empty list; nothing here returns an error to the caller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_theme::ThemeConfig;
use serde_json::Value;

use crate::store::KeyValueStore;

pub const CURRENT_THEME_KEY: &str = "portfolio-current-theme";
pub const CUSTOM_THEMES_KEY: &str = "portfolio-custom-themes";
pub const THEME_HISTORY_KEY: &str = "portfolio-theme-history";

const THEME_KEYS: [&str; 3] = [CURRENT_THEME_KEY, CUSTOM_THEMES_KEY, THEME_HISTORY_KEY];

/// Browser local storage quota.
pub const DEFAULT_STORAGE_LIMIT: usize = 5 * 1024 * 1024;

/// Capacity limits for persisted theme state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStorageLimits {
    /// New custom themes are refused beyond this; replacing one is allowed
    pub max_custom_themes: usize,
    /// History keeps this many most recent ids
    pub max_history: usize,
}

impl Default for ThemeStorageLimits {
    fn default() -> Self {
        Self {
            max_custom_themes: 10,
            max_history: 5,
        }
    }
}

/// Theme persistence over an injected [`KeyValueStore`].
pub struct ThemeStorage {
    store: Arc<dyn KeyValueStore>,
    limits: ThemeStorageLimits,
    // Serializes read-modify-write sequences
    lock: Mutex<()>,
}

impl ThemeStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_limits(store, ThemeStorageLimits::default())
    }

    pub fn with_limits(store: Arc<dyn KeyValueStore>, limits: ThemeStorageLimits) -> Self {
        Self {
            store,
            limits,
            lock: Mutex::new(()),
        }
    }

    pub fn limits(&self) -> ThemeStorageLimits {
        self.limits
    }

    /// The underlying medium, for other records sharing it.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                folio_logger::error(format!("Failed to read '{}': {:#}", key, e));
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> bool {
        match self.store.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                folio_logger::error(format!("Failed to write '{}': {:#}", key, e));
                false
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            folio_logger::error(format!("Failed to remove '{}': {:#}", key, e));
        }
    }

    // Anything other than a JSON array reads as empty
    fn read_array(&self, key: &str) -> Vec<Value> {
        let Some(data) = self.read(key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Value>(&data) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                folio_logger::warn(format!("Ignoring non-array value stored under '{}'", key));
                Vec::new()
            }
            Err(e) => {
                folio_logger::error(format!("Failed to parse '{}': {}", key, e));
                Vec::new()
            }
        }
    }

    fn write_json<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.write(key, &json),
            Err(e) => {
                folio_logger::error(format!("Failed to serialize '{}': {}", key, e));
                false
            }
        }
    }

    // === Current theme ===

    /// Persist the selected theme id and record it in history.
    pub fn save_current_theme(&self, theme_id: &str) {
        let _guard = self.guard();
        if self.write(CURRENT_THEME_KEY, theme_id) {
            self.push_history(theme_id);
        }
    }

    pub fn get_current_theme(&self) -> Option<String> {
        self.read(CURRENT_THEME_KEY)
    }

    pub fn clear_current_theme(&self) {
        self.remove(CURRENT_THEME_KEY);
    }

    // === Custom themes ===

    /// Insert or replace a custom theme.
    ///
    /// Returns `false` when the list is full and `theme` is new, or when the
    /// write fails. A replaced theme moves to the end of the list. Stored
    /// entries that do not parse as themes are kept and count toward the cap.
    pub fn save_custom_theme(&self, theme: &ThemeConfig) -> bool {
        let _guard = self.guard();
        let mut items = self.read_array(CUSTOM_THEMES_KEY);

        let exists = items.iter().any(|item| entry_id(item) == Some(theme.id.as_str()));
        if !exists && items.len() >= self.limits.max_custom_themes {
            folio_logger::warn(format!(
                "Maximum custom themes ({}) reached; '{}' not saved",
                self.limits.max_custom_themes, theme.id
            ));
            return false;
        }

        let value = match serde_json::to_value(theme) {
            Ok(value) => value,
            Err(e) => {
                folio_logger::error(format!("Failed to serialize theme '{}': {}", theme.id, e));
                return false;
            }
        };
        items.retain(|item| entry_id(item) != Some(theme.id.as_str()));
        items.push(value);
        self.write_json(CUSTOM_THEMES_KEY, &items)
    }

    /// Stored custom themes in insertion order. Entries that no longer parse
    /// as themes are skipped.
    pub fn get_custom_themes(&self) -> Vec<ThemeConfig> {
        self.read_array(CUSTOM_THEMES_KEY)
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<ThemeConfig>(item) {
                Ok(theme) => Some(theme),
                Err(e) => {
                    folio_logger::warn(format!("Skipping unreadable custom theme: {}", e));
                    None
                }
            })
            .collect()
    }

    pub fn get_custom_theme(&self, theme_id: &str) -> Option<ThemeConfig> {
        self.get_custom_themes()
            .into_iter()
            .find(|t| t.id == theme_id)
    }

    /// Remove a custom theme. Deleting an unknown id still succeeds.
    pub fn delete_custom_theme(&self, theme_id: &str) -> bool {
        let _guard = self.guard();
        let mut items = self.read_array(CUSTOM_THEMES_KEY);
        items.retain(|item| entry_id(item) != Some(theme_id));
        self.write_json(CUSTOM_THEMES_KEY, &items)
    }

    pub fn clear_custom_themes(&self) {
        self.remove(CUSTOM_THEMES_KEY);
    }

    // === History ===

    fn push_history(&self, theme_id: &str) {
        let mut history = self.get_theme_history();
        history.retain(|id| id != theme_id);
        history.insert(0, theme_id.to_string());
        history.truncate(self.limits.max_history);
        self.write_json(THEME_HISTORY_KEY, &history);
    }

    /// Recently selected ids, most recent first.
    pub fn get_theme_history(&self) -> Vec<String> {
        self.read_array(THEME_HISTORY_KEY)
            .into_iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn clear_theme_history(&self) {
        self.remove(THEME_HISTORY_KEY);
    }

    // === Management ===

    pub fn clear_all_theme_storage(&self) {
        let _guard = self.guard();
        self.clear_current_theme();
        self.clear_custom_themes();
        self.clear_theme_history();
    }

    /// UTF-8 byte size of the three theme records.
    pub fn get_storage_size(&self) -> usize {
        let mut total = 0;
        for key in THEME_KEYS {
            match self.store.get(key) {
                Ok(Some(value)) => total += value.len(),
                Ok(None) => {}
                Err(e) => {
                    folio_logger::error(format!("Failed to measure storage: {:#}", e));
                    return 0;
                }
            }
        }
        total
    }

    /// Whether usage exceeds 90% of `limit_bytes`.
    pub fn is_storage_near_limit(&self, limit_bytes: usize) -> bool {
        self.get_storage_size() as f64 > limit_bytes as f64 * 0.9
    }
}

fn entry_id(item: &Value) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, UnavailableStore};
    use folio_theme::get_theme_by_id;

    fn storage() -> (Arc<MemoryStore>, ThemeStorage) {
        let store = Arc::new(MemoryStore::new());
        let storage = ThemeStorage::new(store.clone());
        (store, storage)
    }

    fn custom(id: &str) -> ThemeConfig {
        let mut theme = get_theme_by_id("dark").unwrap().clone();
        theme.id = id.to_string();
        theme.name = format!("Theme {}", id);
        theme
    }

    #[test]
    fn test_current_theme_round_trip() {
        let (store, storage) = storage();
        assert_eq!(storage.get_current_theme(), None);

        storage.save_current_theme("ocean-breeze");
        assert_eq!(storage.get_current_theme().as_deref(), Some("ocean-breeze"));
        // Stored raw, not JSON-quoted
        assert_eq!(
            store.get(CURRENT_THEME_KEY).unwrap().as_deref(),
            Some("ocean-breeze")
        );

        storage.clear_current_theme();
        assert_eq!(storage.get_current_theme(), None);
    }

    #[test]
    fn test_history_is_deduplicated_and_capped() {
        let (_, storage) = storage();
        for id in ["a", "b", "c", "d", "e", "f", "c"] {
            storage.save_current_theme(id);
        }
        assert_eq!(storage.get_theme_history(), vec!["c", "f", "e", "d", "b"]);

        storage.clear_theme_history();
        assert!(storage.get_theme_history().is_empty());
    }

    #[test]
    fn test_custom_theme_cap() {
        let (_, storage) = storage();
        for i in 0..10 {
            assert!(storage.save_custom_theme(&custom(&format!("custom-{}", i))));
        }
        assert!(!storage.save_custom_theme(&custom("custom-10")));
        assert_eq!(storage.get_custom_themes().len(), 10);

        // Replacing an existing id is still allowed at capacity
        let mut replacement = custom("custom-3");
        replacement.name = "Renamed".into();
        assert!(storage.save_custom_theme(&replacement));

        let themes = storage.get_custom_themes();
        assert_eq!(themes.len(), 10);
        assert_eq!(themes.last().unwrap().name, "Renamed");
        assert_eq!(themes.iter().filter(|t| t.id == "custom-3").count(), 1);
    }

    #[test]
    fn test_save_is_idempotent() {
        let (_, storage) = storage();
        let theme = custom("custom-x");
        assert!(storage.save_custom_theme(&theme));
        assert!(storage.save_custom_theme(&theme));
        assert_eq!(storage.get_custom_themes(), vec![theme.clone()]);
        assert_eq!(storage.get_custom_theme("custom-x"), Some(theme));
        assert_eq!(storage.get_custom_theme("missing"), None);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_, storage) = storage();
        storage.save_custom_theme(&custom("custom-a"));
        storage.save_custom_theme(&custom("custom-b"));

        assert!(storage.delete_custom_theme("custom-a"));
        assert!(storage.delete_custom_theme("custom-a"));
        let ids: Vec<_> = storage.get_custom_themes().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["custom-b"]);
    }

    #[test]
    fn test_corrupt_records_read_as_empty() {
        let (store, storage) = storage();
        store.set(CUSTOM_THEMES_KEY, "{not json").unwrap();
        store.set(THEME_HISTORY_KEY, "{\"a\": 1}").unwrap();
        assert!(storage.get_custom_themes().is_empty());
        assert!(storage.get_theme_history().is_empty());

        // Unreadable entries are skipped, the rest survive
        let good = serde_json::to_value(custom("custom-ok")).unwrap();
        let json = serde_json::json!([good, {"id": "broken"}, 5]).to_string();
        store.set(CUSTOM_THEMES_KEY, &json).unwrap();
        assert_eq!(storage.get_custom_themes().len(), 1);
    }

    #[test]
    fn test_unreadable_entries_survive_writes() {
        let (store, storage) = storage();
        let json = serde_json::json!([{
            "id": "custom-a",
            "name": "A",
            "fonts": {"heading": "x"}
        }])
        .to_string();
        store.set(CUSTOM_THEMES_KEY, &json).unwrap();

        assert!(storage.save_custom_theme(&custom("custom-b")));
        assert!(storage.delete_custom_theme("custom-c"));

        let raw: Vec<Value> =
            serde_json::from_str(&store.get(CUSTOM_THEMES_KEY).unwrap().unwrap()).unwrap();
        let ids: Vec<_> = raw.iter().filter_map(entry_id).collect();
        assert_eq!(ids, vec!["custom-a", "custom-b"]);
        assert_eq!(raw[0]["fonts"]["heading"], "x");

        // Only the readable entry is listed, but both count toward the cap
        assert_eq!(storage.get_custom_themes().len(), 1);
        let capped = ThemeStorage::with_limits(
            store.clone(),
            ThemeStorageLimits {
                max_custom_themes: 2,
                ..storage.limits()
            },
        );
        assert!(!capped.save_custom_theme(&custom("custom-d")));

        assert!(storage.delete_custom_theme("custom-a"));
        assert_eq!(storage.get_custom_themes().len(), 1);
        assert!(capped.save_custom_theme(&custom("custom-d")));
    }

    #[test]
    fn test_clear_all() {
        let (_, storage) = storage();
        storage.save_current_theme("dark");
        storage.save_custom_theme(&custom("custom-a"));
        assert!(storage.get_storage_size() > 0);

        storage.clear_all_theme_storage();
        assert_eq!(storage.get_current_theme(), None);
        assert!(storage.get_custom_themes().is_empty());
        assert!(storage.get_theme_history().is_empty());
        assert_eq!(storage.get_storage_size(), 0);
    }

    #[test]
    fn test_storage_size_counts_utf8_bytes() {
        let (store, storage) = storage();
        store.set(CURRENT_THEME_KEY, "é").unwrap();
        store.set("unrelated", "ignored").unwrap();
        assert_eq!(storage.get_storage_size(), 2);

        assert!(storage.is_storage_near_limit(2));
        assert!(!storage.is_storage_near_limit(3));
        assert!(!storage.is_storage_near_limit(DEFAULT_STORAGE_LIMIT));
    }

    #[test]
    fn test_unavailable_medium_degrades_quietly() {
        let storage = ThemeStorage::new(Arc::new(UnavailableStore));
        storage.save_current_theme("dark");
        assert_eq!(storage.get_current_theme(), None);
        assert!(!storage.save_custom_theme(&custom("custom-a")));
        assert!(!storage.delete_custom_theme("custom-a"));
        assert!(storage.get_custom_themes().is_empty());
        assert!(storage.get_theme_history().is_empty());
        assert_eq!(storage.get_storage_size(), 0);
        assert!(!storage.is_storage_near_limit(1));
        storage.clear_all_theme_storage();
    }

    #[test]
    fn test_configured_limits() {
        let storage = ThemeStorage::with_limits(
            Arc::new(MemoryStore::new()),
            ThemeStorageLimits {
                max_custom_themes: 1,
                max_history: 2,
            },
        );
        assert!(storage.save_custom_theme(&custom("custom-a")));
        assert!(!storage.save_custom_theme(&custom("custom-b")));

        for id in ["x", "y", "z"] {
            storage.save_current_theme(id);
        }
        assert_eq!(storage.get_theme_history(), vec!["z", "y"]);
    }

    #[test]
    fn test_concurrent_saves_respect_cap() {
        let (_, storage) = storage();
        let storage = Arc::new(storage);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let storage = Arc::clone(&storage);
                std::thread::spawn(move || storage.save_custom_theme(&custom(&format!("custom-{}", i))))
            })
            .collect();
        let saved = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(saved, 10);
        assert_eq!(storage.get_custom_themes().len(), 10);
    }
}
