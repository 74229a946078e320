//! Theme system for folio.
//!
//! Themes are palettes of 32 color roles plus optional radius, fonts and
//! animation tokens. Nine presets ship embedded; custom themes are kept
//! by `folio-storage`.

mod compose;
mod css;
mod loader;
mod model;
mod registry;
mod validate;

pub use compose::{
    custom_theme_id, merge_themes, prepare_custom_theme, AnimationsOverride, FontsOverride,
    ThemeOverride,
};
pub use css::{
    apply_theme, apply_theme_shared, css_variable_name, theme_to_css, CssVariables, RootStyle,
    StyleScope,
};
pub use loader::{load_theme, load_theme_from_str, ThemeFormat};
pub use model::{
    AnimationDurations, AnimationEasings, ThemeAnimations, ThemeColors, ThemeConfig, ThemeFonts,
    ThemeMetadata, ThemePreview, COLOR_ROLES,
};
pub use registry::{
    all_themes, get_all_theme_ids, get_theme_by_id, is_base_preset, theme_exists, ThemeRegistry,
    BASE_THEME_IDS,
};
pub use validate::{validate_theme, ThemeValidation};

/// Theme every fresh session starts with.
pub const DEFAULT_THEME_ID: &str = "dark";

/// Search built-in themes by name, description or tag.
pub fn search_themes(query: &str) -> Vec<&'static ThemeConfig> {
    all_themes()
        .iter()
        .filter(|theme| theme.matches_query(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_exists() {
        assert!(theme_exists(DEFAULT_THEME_ID));
    }

    #[test]
    fn test_search_themes() {
        let found: Vec<_> = search_themes("OCEAN").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(found, vec!["ocean-breeze"]);
        assert_eq!(search_themes("").len(), all_themes().len());
        assert!(search_themes("zzzz-no-match").is_empty());
    }
}
