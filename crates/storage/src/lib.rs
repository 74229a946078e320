//! Persistence for folio.
//!
//! A [`KeyValueStore`] is the raw medium; [`ThemeStorage`] keeps theme
//! records on top of it and never surfaces storage errors. The `share`
//! functions move themes in and out as JSON and URL-safe links.

mod share;
mod store;
mod theme_storage;

pub use share::{
    create_theme_share_url, decode_theme_from_url, encode_theme_for_url, export_theme,
    get_custom_theme_from_url, get_theme_from_url, import_theme, PageLocation,
    CUSTOM_THEME_PARAM, THEME_PARAM,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, UnavailableStore};
pub use theme_storage::{
    ThemeStorage, ThemeStorageLimits, CURRENT_THEME_KEY, CUSTOM_THEMES_KEY,
    DEFAULT_STORAGE_LIMIT, THEME_HISTORY_KEY,
};
