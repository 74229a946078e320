//! Theme customization session.

use folio_storage::{
    create_theme_share_url, export_theme, get_custom_theme_from_url, get_theme_from_url,
    import_theme, PageLocation, ThemeStorage,
};
use folio_theme::{
    all_themes, apply_theme, get_theme_by_id, is_base_preset, theme_exists, validate_theme,
    StyleScope, ThemeConfig, DEFAULT_THEME_ID,
};

use crate::BaseMode;

/// Current selection, custom themes and preview for one visitor.
///
/// Every mutation writes to storage first and only then updates memory,
/// so a failed write leaves the in-memory state untouched.
pub struct ThemeCustomization {
    storage: ThemeStorage,
    /// Selected when nothing is stored and after the active theme is removed
    default_theme: String,
    /// Selected theme id
    current_theme: String,
    /// Custom themes as last read from storage
    custom_themes: Vec<ThemeConfig>,
    /// Unsaved theme shown instead of the current one
    preview_theme: Option<ThemeConfig>,
    /// Recent theme ids, most recent first
    theme_history: Vec<String>,
    /// Is the editor open
    is_customizing: bool,
}

impl ThemeCustomization {
    pub fn new(storage: ThemeStorage) -> Self {
        Self {
            storage,
            default_theme: DEFAULT_THEME_ID.to_string(),
            current_theme: DEFAULT_THEME_ID.to_string(),
            custom_themes: Vec::new(),
            preview_theme: None,
            theme_history: Vec::new(),
            is_customizing: false,
        }
    }

    /// Use `theme_id` instead of `dark` as the fallback selection. Unknown
    /// ids are ignored.
    pub fn with_default_theme(mut self, theme_id: &str) -> Self {
        if theme_exists(theme_id) {
            self.default_theme = theme_id.to_string();
            self.current_theme = theme_id.to_string();
        } else {
            folio_logger::warn(format!(
                "Unknown default theme '{}'; keeping '{}'",
                theme_id, self.default_theme
            ));
        }
        self
    }

    pub fn default_theme(&self) -> &str {
        &self.default_theme
    }

    pub fn storage(&self) -> &ThemeStorage {
        &self.storage
    }

    pub fn current_theme(&self) -> &str {
        &self.current_theme
    }

    pub fn custom_themes(&self) -> &[ThemeConfig] {
        &self.custom_themes
    }

    pub fn preview_theme(&self) -> Option<&ThemeConfig> {
        self.preview_theme.as_ref()
    }

    pub fn theme_history(&self) -> &[String] {
        &self.theme_history
    }

    pub fn is_customizing(&self) -> bool {
        self.is_customizing
    }

    /// Re-read the current theme, custom themes and history from storage.
    pub fn initialize(&mut self) {
        self.current_theme = self
            .storage
            .get_current_theme()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.default_theme.clone());
        self.load_custom_themes();
        self.load_theme_history();
    }

    pub fn set_theme(&mut self, theme_id: &str) {
        self.storage.save_current_theme(theme_id);
        self.current_theme = theme_id.to_string();
        self.load_theme_history();
    }

    fn save_custom(&mut self, theme: &ThemeConfig) -> bool {
        let report = validate_theme(theme);
        if !report.valid {
            folio_logger::warn(format!(
                "Rejected custom theme '{}': {}",
                theme.id,
                report.errors.join("; ")
            ));
            return false;
        }
        if theme_exists(&theme.id) {
            folio_logger::warn(format!(
                "Rejected custom theme '{}': id belongs to a built-in theme",
                theme.id
            ));
            return false;
        }

        if !self.storage.save_custom_theme(theme) {
            return false;
        }
        self.load_custom_themes();
        true
    }

    /// Validate and store a new custom theme.
    pub fn create_custom_theme(&mut self, theme: &ThemeConfig) -> bool {
        self.save_custom(theme)
    }

    /// Validate and store an edited custom theme under its existing id.
    pub fn update_custom_theme(&mut self, theme: &ThemeConfig) -> bool {
        self.save_custom(theme)
    }

    /// Delete a custom theme; if it was selected, fall back to the default
    /// theme.
    pub fn remove_custom_theme(&mut self, theme_id: &str) -> bool {
        if !self.storage.delete_custom_theme(theme_id) {
            return false;
        }
        self.load_custom_themes();

        if self.current_theme == theme_id {
            let fallback = self.default_theme.clone();
            folio_logger::info(format!(
                "Active theme '{}' removed; switching to '{}'",
                theme_id, fallback
            ));
            self.set_theme(&fallback);
        }
        true
    }

    pub fn set_preview_theme(&mut self, theme: Option<ThemeConfig>) {
        self.preview_theme = theme;
    }

    pub fn toggle_customizing(&mut self) {
        self.is_customizing = !self.is_customizing;
    }

    /// Pretty JSON for a built-in or custom theme.
    pub fn export_theme_as_json(&self, theme_id: &str) -> Option<String> {
        self.find_theme(theme_id).map(export_theme)
    }

    /// Parse, validate and store a theme from JSON.
    pub fn import_theme_from_json(&mut self, json: &str) -> bool {
        match import_theme(json) {
            Some(theme) => self.create_custom_theme(&theme),
            None => false,
        }
    }

    /// Share link for a built-in or custom theme, relative to `location`.
    pub fn get_share_url(&self, theme_id: &str, location: &PageLocation) -> Option<String> {
        self.find_theme(theme_id)
            .map(|theme| create_theme_share_url(theme, location))
    }

    pub fn load_custom_themes(&mut self) {
        self.custom_themes = self.storage.get_custom_themes();
    }

    pub fn load_theme_history(&mut self) {
        self.theme_history = self.storage.get_theme_history();
    }

    /// Built-in themes followed by custom themes.
    pub fn all_themes(&self) -> Vec<&ThemeConfig> {
        all_themes().iter().chain(&self.custom_themes).collect()
    }

    /// Built-in themes win over custom themes with the same id.
    pub fn find_theme(&self, theme_id: &str) -> Option<&ThemeConfig> {
        if let Some(theme) = get_theme_by_id(theme_id) {
            return Some(theme);
        }
        self.custom_themes.iter().find(|t| t.id == theme_id)
    }

    pub fn is_custom_theme(&self, theme_id: &str) -> bool {
        self.custom_themes.iter().any(|t| t.id == theme_id)
    }

    /// The theme to display: the preview if one is set, else the current
    /// theme.
    pub fn active_theme(&self) -> Option<&ThemeConfig> {
        self.preview_theme
            .as_ref()
            .or_else(|| self.find_theme(&self.current_theme))
    }

    /// Initialize, then honor a theme carried by the page URL.
    ///
    /// A `customTheme` parameter is imported and selected (a built-in id is
    /// selected without importing); otherwise a `theme` parameter naming a
    /// known theme is selected. Returns the id
    /// selected from the URL, if any.
    pub fn bootstrap(&mut self, location: Option<&PageLocation>) -> Option<String> {
        self.initialize();
        let location = location?;

        if let Some(theme) = get_custom_theme_from_url(location) {
            // Share links for built-in themes carry the full config too
            let saved = !theme_exists(&theme.id) && self.create_custom_theme(&theme);
            if !saved && self.find_theme(&theme.id).is_none() {
                folio_logger::warn(format!("Shared theme '{}' could not be saved", theme.id));
                return None;
            }
            self.set_theme(&theme.id);
            return Some(theme.id);
        }

        let theme_id = get_theme_from_url(location)?;
        if self.find_theme(&theme_id).is_none() {
            folio_logger::warn(format!("Theme from URL not found: {}", theme_id));
            return None;
        }
        self.set_theme(&theme_id);
        Some(theme_id)
    }

    /// Write the active theme onto `scope`.
    pub fn apply_active<S: StyleScope + ?Sized>(&self, scope: &mut S) -> bool {
        match self.active_theme() {
            Some(theme) => apply_theme(theme, scope),
            None => {
                folio_logger::warn(format!("Theme not found: {}", self.current_theme));
                false
            }
        }
    }

    /// Follow a light/dark mode switch from the host.
    ///
    /// Only a base preset selection follows the switch; any other selected
    /// theme is kept. Returns whether the selection changed.
    pub fn sync_base_mode(&mut self, mode: BaseMode) -> bool {
        let target = mode.theme_id();
        if self.current_theme == target {
            return false;
        }
        if !is_base_preset(&self.current_theme) {
            folio_logger::debug(format!(
                "Ignoring {} mode switch; '{}' is not a base preset",
                target, self.current_theme
            ));
            return false;
        }
        self.set_theme(target);
        true
    }
}
