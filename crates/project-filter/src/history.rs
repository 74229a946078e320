//! Persisted project search history.

use anyhow::Context;
use std::sync::Arc;

use folio_storage::KeyValueStore;
use serde_json::Value;

pub const SEARCH_HISTORY_KEY: &str = "project-search-history";

pub const DEFAULT_MAX_HISTORY: usize = 20;
pub const DEFAULT_RECENT_DISPLAY: usize = 10;

/// Most-recent-first list of past queries.
///
/// Storage failures are logged; the in-memory list stays authoritative for
/// the session.
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<String>,
    max_entries: usize,
    recent_display: usize,
}

impl SearchHistory {
    /// Load with the default limits.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_limits(store, DEFAULT_MAX_HISTORY, DEFAULT_RECENT_DISPLAY)
    }

    pub fn load_with_limits(
        store: Arc<dyn KeyValueStore>,
        max_entries: usize,
        recent_display: usize,
    ) -> Self {
        let mut entries = read_entries(store.as_ref());
        entries.truncate(max_entries);
        Self {
            store,
            entries,
            max_entries,
            recent_display,
        }
    }

    /// Every stored query, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The queries shown as suggestions.
    pub fn recent(&self) -> &[String] {
        &self.entries[..self.entries.len().min(self.recent_display)]
    }

    /// Record a query. Blank queries are ignored; a repeat moves to the front.
    pub fn push(&mut self, query: &str) {
        if query.trim().is_empty() {
            return;
        }

        self.entries.retain(|item| item != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.max_entries);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(SEARCH_HISTORY_KEY) {
            folio_logger::error(format!("Failed to clear search history: {:#}", e));
        }
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.entries)
            .context("Failed to serialize search history")
            .and_then(|json| self.store.set(SEARCH_HISTORY_KEY, &json));
        if let Err(e) = result {
            folio_logger::error(format!("Failed to save search history: {:#}", e));
        }
    }
}

fn read_entries(store: &dyn KeyValueStore) -> Vec<String> {
    let data = match store.get(SEARCH_HISTORY_KEY) {
        Ok(Some(data)) => data,
        Ok(None) => return Vec::new(),
        Err(e) => {
            folio_logger::error(format!("Failed to load search history: {:#}", e));
            return Vec::new();
        }
    };

    match serde_json::from_str::<Value>(&data) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(query) => Some(query),
                _ => None,
            })
            .collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            folio_logger::error(format!("Failed to load search history: {}", e));
            Vec::new()
        }
    }
}
