//! Deriving new themes from existing ones.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::model::{AnimationDurations, AnimationEasings, ThemeAnimations, ThemeConfig, ThemeFonts};

const DEFAULT_HEADING_FONT: &str = "inherit";
const DEFAULT_BODY_FONT: &str = "inherit";
const DEFAULT_MONO_FONT: &str = "monospace";
const DEFAULT_DURATION_FAST: &str = "200ms";
const DEFAULT_DURATION_NORMAL: &str = "300ms";
const DEFAULT_DURATION_SLOW: &str = "500ms";
const DEFAULT_EASING: &str = "ease-in-out";
const DEFAULT_EASING_SMOOTH: &str = "cubic-bezier(0.4, 0, 0.2, 1)";
const DEFAULT_EASING_BOUNCE: &str = "cubic-bezier(0.68, -0.55, 0.265, 1.55)";

/// Partial font overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontsOverride {
    pub heading: Option<String>,
    pub body: Option<String>,
    pub mono: Option<String>,
}

/// Partial animation overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationsOverride {
    pub fast: Option<String>,
    pub normal: Option<String>,
    pub slow: Option<String>,
    pub easing_default: Option<String>,
    pub easing_smooth: Option<String>,
    pub easing_bounce: Option<String>,
}

/// Fields to change on top of a base theme. `None` keeps the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOverride {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub radius: Option<String>,
    /// Color role key -> value; unknown roles are ignored
    pub colors: BTreeMap<String, String>,
    pub fonts: Option<FontsOverride>,
    pub animations: Option<AnimationsOverride>,
}

fn pick(over: Option<&String>, base: Option<&String>, default: &str) -> String {
    over.or(base).cloned().unwrap_or_else(|| default.to_string())
}

/// Overlay `over` onto `base`.
///
/// Fonts and animations are merged field by field when either side has
/// them, with stock defaults for fields neither side sets.
pub fn merge_themes(base: &ThemeConfig, over: &ThemeOverride) -> ThemeConfig {
    let mut merged = base.clone();

    if let Some(id) = &over.id {
        merged.id = id.clone();
    }
    if let Some(name) = &over.name {
        merged.name = name.clone();
    }
    if let Some(description) = &over.description {
        merged.description = description.clone();
    }
    if over.author.is_some() {
        merged.author = over.author.clone();
    }
    if over.tags.is_some() {
        merged.tags = over.tags.clone();
    }
    if over.radius.is_some() {
        merged.radius = over.radius.clone();
    }
    for (role, value) in &over.colors {
        merged.colors.set(role, value.as_str());
    }

    if base.fonts.is_some() || over.fonts.is_some() {
        let b = base.fonts.as_ref();
        let o = over.fonts.as_ref();
        merged.fonts = Some(ThemeFonts {
            heading: pick(
                o.and_then(|f| f.heading.as_ref()),
                b.map(|f| &f.heading),
                DEFAULT_HEADING_FONT,
            ),
            body: pick(
                o.and_then(|f| f.body.as_ref()),
                b.map(|f| &f.body),
                DEFAULT_BODY_FONT,
            ),
            mono: pick(
                o.and_then(|f| f.mono.as_ref()),
                b.map(|f| &f.mono),
                DEFAULT_MONO_FONT,
            ),
        });
    }

    if base.animations.is_some() || over.animations.is_some() {
        let b = base.animations.as_ref();
        let o = over.animations.as_ref();
        merged.animations = Some(ThemeAnimations {
            duration: AnimationDurations {
                fast: pick(
                    o.and_then(|a| a.fast.as_ref()),
                    b.map(|a| &a.duration.fast),
                    DEFAULT_DURATION_FAST,
                ),
                normal: pick(
                    o.and_then(|a| a.normal.as_ref()),
                    b.map(|a| &a.duration.normal),
                    DEFAULT_DURATION_NORMAL,
                ),
                slow: pick(
                    o.and_then(|a| a.slow.as_ref()),
                    b.map(|a| &a.duration.slow),
                    DEFAULT_DURATION_SLOW,
                ),
            },
            easing: AnimationEasings {
                default: pick(
                    o.and_then(|a| a.easing_default.as_ref()),
                    b.map(|a| &a.easing.default),
                    DEFAULT_EASING,
                ),
                smooth: pick(
                    o.and_then(|a| a.easing_smooth.as_ref()),
                    b.map(|a| &a.easing.smooth),
                    DEFAULT_EASING_SMOOTH,
                ),
                bounce: pick(
                    o.and_then(|a| a.easing_bounce.as_ref()),
                    b.map(|a| &a.easing.bounce),
                    DEFAULT_EASING_BOUNCE,
                ),
            },
        });
    }

    merged
}

/// `custom-<slug>-<millis>`, where the slug lowercases `name` and turns
/// whitespace runs into `-`.
pub fn custom_theme_id(name: &str, timestamp_millis: i64) -> String {
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("custom-{}-{}", slug, timestamp_millis)
}

/// Give an edited theme its final id before saving.
///
/// A theme still carrying its base theme's id (or none at all) is new and
/// gets a fresh timestamped id; anything else is an edit of an existing
/// custom theme and keeps its id.
pub fn prepare_custom_theme(mut draft: ThemeConfig, base_id: &str) -> ThemeConfig {
    if draft.id.is_empty() || draft.id == base_id {
        draft.id = custom_theme_id(&draft.name, Utc::now().timestamp_millis());
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::get_theme_by_id;

    #[test]
    fn test_custom_theme_id() {
        assert_eq!(custom_theme_id("My  Cool\tTheme", 1700000000000), "custom-my-cool-theme-1700000000000");
        assert_eq!(custom_theme_id("Solo", 5), "custom-solo-5");
    }

    #[test]
    fn test_prepare_assigns_id_only_for_new_themes() {
        let dark = get_theme_by_id("dark").unwrap().clone();

        let mut draft = dark.clone();
        draft.name = "Night Owl".into();
        let prepared = prepare_custom_theme(draft, "dark");
        assert!(prepared.id.starts_with("custom-night-owl-"));

        let mut edit = dark;
        edit.id = "custom-night-owl-42".into();
        assert_eq!(prepare_custom_theme(edit, "dark").id, "custom-night-owl-42");
    }

    #[test]
    fn test_merge_overrides_colors_and_metadata() {
        let base = get_theme_by_id("forest-green").unwrap();
        let mut over = ThemeOverride {
            name: Some("Moss".into()),
            radius: Some("1rem".into()),
            ..Default::default()
        };
        over.colors.insert("primary".into(), "#228833".into());
        over.colors.insert("bogus".into(), "#000000".into());

        let merged = merge_themes(base, &over);
        assert_eq!(merged.id, base.id);
        assert_eq!(merged.name, "Moss");
        assert_eq!(merged.radius.as_deref(), Some("1rem"));
        assert_eq!(merged.colors.primary, "#228833");
        assert_eq!(merged.colors.secondary, base.colors.secondary);
        assert!(merged.fonts.is_none());
        assert!(merged.animations.is_none());
    }

    #[test]
    fn test_merge_fills_defaults() {
        let base = get_theme_by_id("cyber-neon").unwrap();
        let over = ThemeOverride {
            fonts: Some(FontsOverride {
                heading: Some("Orbitron".into()),
                ..Default::default()
            }),
            animations: Some(AnimationsOverride {
                fast: Some("120ms".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = merge_themes(base, &over);
        let fonts = merged.fonts.unwrap();
        assert_eq!(fonts.heading, "Orbitron");
        assert_eq!(fonts.body, "inherit");
        assert_eq!(fonts.mono, "monospace");

        let animations = merged.animations.unwrap();
        assert_eq!(animations.duration.fast, "120ms");
        assert_eq!(animations.duration.slow, "500ms");
        assert_eq!(animations.easing.bounce, DEFAULT_EASING_BOUNCE);
    }

    #[test]
    fn test_merge_keeps_base_animations() {
        let base = get_theme_by_id("light").unwrap();
        let merged = merge_themes(base, &ThemeOverride::default());
        assert_eq!(&merged, base);
    }
}
