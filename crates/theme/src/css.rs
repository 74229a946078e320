//! Projection of a theme onto CSS custom properties.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Mutex;

use crate::model::ThemeConfig;
use crate::validate::validate_theme;

/// Ordered `--name: value` pairs produced by [`theme_to_css`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssVariables {
    entries: Vec<(String, String)>,
}

impl CssVariables {
    fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `primaryForeground` -> `--primary-foreground`.
pub fn css_variable_name(role: &str) -> String {
    let mut name = String::with_capacity(role.len() + 4);
    name.push_str("--");
    for ch in role.chars() {
        if ch.is_ascii_uppercase() {
            name.push('-');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}

/// Flatten a theme into CSS variables: every color role, then radius and
/// animation tokens when the theme defines them.
pub fn theme_to_css(theme: &ThemeConfig) -> CssVariables {
    let mut vars = CssVariables::default();

    for (role, value) in theme.colors.entries() {
        vars.push(css_variable_name(role), value);
    }

    if let Some(radius) = &theme.radius {
        vars.push("--radius", radius.as_str());
    }

    if let Some(animations) = &theme.animations {
        let duration = &animations.duration;
        vars.push("--animation-duration-fast", duration.fast.as_str());
        vars.push("--animation-duration-normal", duration.normal.as_str());
        vars.push("--animation-duration-slow", duration.slow.as_str());

        let easing = &animations.easing;
        vars.push("--animation-easing-default", easing.default.as_str());
        vars.push("--animation-easing-smooth", easing.smooth.as_str());
        vars.push("--animation-easing-bounce", easing.bounce.as_str());
    }

    vars
}

/// A live style scope (the document root in a browser host).
pub trait StyleScope {
    fn set_property(&mut self, name: &str, value: &str);
}

/// Validate `theme` and write its variables onto `scope`.
///
/// An invalid theme is refused and nothing is written.
pub fn apply_theme<S: StyleScope + ?Sized>(theme: &ThemeConfig, scope: &mut S) -> bool {
    let report = validate_theme(theme);
    if !report.valid {
        folio_logger::warn(format!(
            "Refusing to apply invalid theme '{}': {}",
            theme.id,
            report.errors.join("; ")
        ));
        return false;
    }

    folio_logger::info(format!("Applying theme: {} ({})", theme.name, theme.id));
    for (name, value) in theme_to_css(theme).iter() {
        scope.set_property(name, value);
    }
    true
}

/// [`apply_theme`] for a scope shared between threads.
///
/// The lock is held for the whole write so two themes never interleave.
pub fn apply_theme_shared<S: StyleScope>(theme: &ThemeConfig, scope: &Mutex<S>) -> bool {
    match scope.lock() {
        Ok(mut guard) => apply_theme(theme, &mut *guard),
        Err(_) => {
            folio_logger::error("Style scope lock poisoned; theme not applied");
            false
        }
    }
}

/// In-memory root style scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootStyle {
    properties: BTreeMap<String, String>,
}

impl RootStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Render as a `:root { ... }` block.
    pub fn render(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.properties {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push('}');
        css
    }
}

impl StyleScope for RootStyle {
    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }
}
