//! Theme data model.

use serde::{Deserialize, Serialize};

/// Color role keys in display order, as they appear in theme files.
pub const COLOR_ROLES: [&str; 32] = [
    "background",
    "foreground",
    "card",
    "cardForeground",
    "popover",
    "popoverForeground",
    "primary",
    "primaryForeground",
    "secondary",
    "secondaryForeground",
    "muted",
    "mutedForeground",
    "accent",
    "accentForeground",
    "destructive",
    "destructiveForeground",
    "border",
    "input",
    "ring",
    "chart1",
    "chart2",
    "chart3",
    "chart4",
    "chart5",
    "sidebar",
    "sidebarForeground",
    "sidebarPrimary",
    "sidebarPrimaryForeground",
    "sidebarAccent",
    "sidebarAccentForeground",
    "sidebarBorder",
    "sidebarRing",
];

/// Color tokens used across the site.
///
/// Every value is a color string (OKLCH, RGB, HSL or HEX); see
/// [`crate::validate_theme`] for the accepted grammar. Roles missing from
/// the input deserialize as empty strings so validation can name them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeColors {
    // === Base ===
    pub background: String,
    pub foreground: String,

    // === Components ===
    pub card: String,
    pub card_foreground: String,
    pub popover: String,
    pub popover_foreground: String,

    // === Semantic ===
    pub primary: String,
    pub primary_foreground: String,
    pub secondary: String,
    pub secondary_foreground: String,
    pub muted: String,
    pub muted_foreground: String,
    pub accent: String,
    pub accent_foreground: String,
    pub destructive: String,
    pub destructive_foreground: String,

    // === UI ===
    pub border: String,
    pub input: String,
    pub ring: String,

    // === Charts ===
    pub chart1: String,
    pub chart2: String,
    pub chart3: String,
    pub chart4: String,
    pub chart5: String,

    // === Sidebar ===
    pub sidebar: String,
    pub sidebar_foreground: String,
    pub sidebar_primary: String,
    pub sidebar_primary_foreground: String,
    pub sidebar_accent: String,
    pub sidebar_accent_foreground: String,
    pub sidebar_border: String,
    pub sidebar_ring: String,
}

impl ThemeColors {
    /// Look up a color by its camelCase role key.
    pub fn get(&self, role: &str) -> Option<&str> {
        let value = match role {
            "background" => &self.background,
            "foreground" => &self.foreground,
            "card" => &self.card,
            "cardForeground" => &self.card_foreground,
            "popover" => &self.popover,
            "popoverForeground" => &self.popover_foreground,
            "primary" => &self.primary,
            "primaryForeground" => &self.primary_foreground,
            "secondary" => &self.secondary,
            "secondaryForeground" => &self.secondary_foreground,
            "muted" => &self.muted,
            "mutedForeground" => &self.muted_foreground,
            "accent" => &self.accent,
            "accentForeground" => &self.accent_foreground,
            "destructive" => &self.destructive,
            "destructiveForeground" => &self.destructive_foreground,
            "border" => &self.border,
            "input" => &self.input,
            "ring" => &self.ring,
            "chart1" => &self.chart1,
            "chart2" => &self.chart2,
            "chart3" => &self.chart3,
            "chart4" => &self.chart4,
            "chart5" => &self.chart5,
            "sidebar" => &self.sidebar,
            "sidebarForeground" => &self.sidebar_foreground,
            "sidebarPrimary" => &self.sidebar_primary,
            "sidebarPrimaryForeground" => &self.sidebar_primary_foreground,
            "sidebarAccent" => &self.sidebar_accent,
            "sidebarAccentForeground" => &self.sidebar_accent_foreground,
            "sidebarBorder" => &self.sidebar_border,
            "sidebarRing" => &self.sidebar_ring,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn slot_mut(&mut self, role: &str) -> Option<&mut String> {
        let slot = match role {
            "background" => &mut self.background,
            "foreground" => &mut self.foreground,
            "card" => &mut self.card,
            "cardForeground" => &mut self.card_foreground,
            "popover" => &mut self.popover,
            "popoverForeground" => &mut self.popover_foreground,
            "primary" => &mut self.primary,
            "primaryForeground" => &mut self.primary_foreground,
            "secondary" => &mut self.secondary,
            "secondaryForeground" => &mut self.secondary_foreground,
            "muted" => &mut self.muted,
            "mutedForeground" => &mut self.muted_foreground,
            "accent" => &mut self.accent,
            "accentForeground" => &mut self.accent_foreground,
            "destructive" => &mut self.destructive,
            "destructiveForeground" => &mut self.destructive_foreground,
            "border" => &mut self.border,
            "input" => &mut self.input,
            "ring" => &mut self.ring,
            "chart1" => &mut self.chart1,
            "chart2" => &mut self.chart2,
            "chart3" => &mut self.chart3,
            "chart4" => &mut self.chart4,
            "chart5" => &mut self.chart5,
            "sidebar" => &mut self.sidebar,
            "sidebarForeground" => &mut self.sidebar_foreground,
            "sidebarPrimary" => &mut self.sidebar_primary,
            "sidebarPrimaryForeground" => &mut self.sidebar_primary_foreground,
            "sidebarAccent" => &mut self.sidebar_accent,
            "sidebarAccentForeground" => &mut self.sidebar_accent_foreground,
            "sidebarBorder" => &mut self.sidebar_border,
            "sidebarRing" => &mut self.sidebar_ring,
            _ => return None,
        };
        Some(slot)
    }

    /// Replace a color by role key. Returns `false` for an unknown role.
    pub fn set(&mut self, role: &str, value: impl Into<String>) -> bool {
        match self.slot_mut(role) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// `(role, value)` pairs in [`COLOR_ROLES`] order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        COLOR_ROLES
            .into_iter()
            .filter_map(move |role| self.get(role).map(|value| (role, value)))
    }

    /// Build a palette by asking `color_for` for every role.
    pub fn from_fn(mut color_for: impl FnMut(&str) -> String) -> Self {
        let mut colors = Self::default();
        for role in COLOR_ROLES {
            colors.set(role, color_for(role));
        }
        colors
    }
}

/// Font families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub heading: String,
    pub body: String,
    pub mono: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDurations {
    pub fast: String,
    pub normal: String,
    pub slow: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationEasings {
    pub default: String,
    pub smooth: String,
    pub bounce: String,
}

/// Animation timing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeAnimations {
    pub duration: AnimationDurations,
    pub easing: AnimationEasings,
}

/// Complete theme configuration.
///
/// Serialized with camelCase keys; optional sections are omitted when
/// absent so exported JSON matches what the site reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Unique slug across built-in and custom themes
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// CSS length, e.g. `0.625rem`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
    pub colors: ThemeColors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<ThemeFonts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<ThemeAnimations>,
}

impl ThemeConfig {
    /// Summary for theme pickers.
    pub fn metadata(&self) -> ThemeMetadata {
        ThemeMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
            preview: ThemePreview {
                primary: self.colors.primary.clone(),
                secondary: self.colors.secondary.clone(),
                accent: self.colors.accent.clone(),
                background: self.colors.background.clone(),
            },
        }
    }

    /// Case-insensitive match on name, description or any tag.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self
                .tags
                .iter()
                .flatten()
                .any(|tag| tag.to_lowercase().contains(&query))
    }
}

/// Swatch colors shown next to a theme name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemePreview {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

/// Display-only view of a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub preview: ThemePreview,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_cover_every_field() {
        let colors = ThemeColors::from_fn(|role| format!("value-{}", role));
        for role in COLOR_ROLES {
            assert_eq!(colors.get(role), Some(format!("value-{}", role).as_str()));
        }
        assert_eq!(colors.entries().count(), COLOR_ROLES.len());
    }

    #[test]
    fn test_serialized_keys_are_role_keys() {
        let colors = ThemeColors::from_fn(|_| "#000000".into());
        let value = serde_json::to_value(&colors).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), COLOR_ROLES.len());
        for role in COLOR_ROLES {
            assert!(object.contains_key(role), "missing {}", role);
        }
    }

    #[test]
    fn test_set_unknown_role() {
        let mut colors = ThemeColors::default();
        assert!(colors.set("primaryForeground", "#ffffff"));
        assert!(!colors.set("tertiary", "#ffffff"));
        assert_eq!(colors.primary_foreground, "#ffffff");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let theme = ThemeConfig {
            id: "t".into(),
            name: "T".into(),
            description: String::new(),
            author: None,
            tags: None,
            radius: None,
            colors: ThemeColors::default(),
            fonts: None,
            animations: None,
        };
        let json = serde_json::to_string(&theme).unwrap();
        assert!(!json.contains("author"));
        assert!(!json.contains("animations"));
    }
}
