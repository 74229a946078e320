//! Built-in theme registry.
//!
//! Theme files are embedded at compile time and parsed once on first use.
//! The registry never changes afterwards; custom themes live in storage.

use std::sync::OnceLock;

use crate::loader::{load_theme_from_str, ThemeFormat};
use crate::model::{ThemeColors, ThemeConfig};

/// Theme ids that mirror the site's light/dark mode switch.
pub const BASE_THEME_IDS: [&str; 2] = ["light", "dark"];

// Embedded theme files, in display order
const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("light", include_str!("../themes/light.toml")),
    ("dark", include_str!("../themes/dark.toml")),
    ("midnight-blue", include_str!("../themes/midnight-blue.toml")),
    ("sunset-orange", include_str!("../themes/sunset-orange.toml")),
    ("forest-green", include_str!("../themes/forest-green.toml")),
    ("cyber-neon", include_str!("../themes/cyber-neon.toml")),
    ("minimal-mono", include_str!("../themes/minimal-mono.toml")),
    ("ocean-breeze", include_str!("../themes/ocean-breeze.toml")),
    ("royal-purple", include_str!("../themes/royal-purple.toml")),
];

static BUILTIN: OnceLock<ThemeRegistry> = OnceLock::new();

/// Hardcoded theme used when an embedded file fails to parse.
fn fallback_theme(id: &str) -> ThemeConfig {
    let light = id == "light";
    let (background, foreground) = if light {
        ("oklch(1 0 0)", "oklch(0.145 0 0)")
    } else {
        ("oklch(0.145 0 0)", "oklch(0.985 0 0)")
    };

    ThemeConfig {
        id: id.to_string(),
        name: id.to_string(),
        description: "Fallback theme".to_string(),
        author: Some("System".to_string()),
        tags: None,
        radius: Some("0.625rem".to_string()),
        colors: ThemeColors::from_fn(|role| {
            if role.ends_with("Foreground") || role == "foreground" {
                foreground.to_string()
            } else if role == "destructive" {
                "oklch(0.577 0.245 27.325)".to_string()
            } else {
                background.to_string()
            }
        }),
        fonts: None,
        animations: None,
    }
}

fn load_builtin(id: &str, content: &str) -> ThemeConfig {
    match load_theme_from_str(content, ThemeFormat::Toml) {
        Ok(theme) if theme.id == id => theme,
        Ok(theme) => {
            folio_logger::error(format!(
                "Built-in theme file for '{}' declares id '{}'. Using fallback theme.",
                id, theme.id
            ));
            fallback_theme(id)
        }
        Err(e) => {
            folio_logger::error(format!(
                "Failed to parse built-in theme '{}': {}. Using fallback theme.",
                id, e
            ));
            fallback_theme(id)
        }
    }
}

/// Immutable, ordered set of themes addressable by id.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<ThemeConfig>,
}

impl ThemeRegistry {
    /// The process-wide registry of built-in themes.
    pub fn builtin() -> &'static ThemeRegistry {
        BUILTIN.get_or_init(|| {
            Self::from_themes(
                BUILTIN_THEMES
                    .iter()
                    .map(|(id, content)| load_builtin(id, content))
                    .collect(),
            )
        })
    }

    /// Build a registry from explicit themes; later duplicates are dropped.
    pub fn from_themes(themes: Vec<ThemeConfig>) -> Self {
        let mut unique: Vec<ThemeConfig> = Vec::with_capacity(themes.len());
        for theme in themes {
            if !unique.iter().any(|t| t.id == theme.id) {
                unique.push(theme);
            }
        }
        Self { themes: unique }
    }

    pub fn get(&self, id: &str) -> Option<&ThemeConfig> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.id.as_str()).collect()
    }

    /// All themes in display order.
    pub fn all(&self) -> &[ThemeConfig] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

/// Get a built-in theme by id.
pub fn get_theme_by_id(id: &str) -> Option<&'static ThemeConfig> {
    ThemeRegistry::builtin().get(id)
}

/// Ids of all built-in themes.
pub fn get_all_theme_ids() -> Vec<&'static str> {
    ThemeRegistry::builtin().ids()
}

pub fn theme_exists(id: &str) -> bool {
    ThemeRegistry::builtin().contains(id)
}

/// All built-in themes, in display order.
pub fn all_themes() -> &'static [ThemeConfig] {
    ThemeRegistry::builtin().all()
}

/// Whether `id` is one of the light/dark base presets.
pub fn is_base_preset(id: &str) -> bool {
    BASE_THEME_IDS.contains(&id)
}
