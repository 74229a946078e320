//! Theme validation.

use folio_color::is_valid_color;

use crate::model::ThemeConfig;

/// Outcome of [`validate_theme`]: human-readable problems, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check required metadata and every color token.
///
/// Callers decide what to do with an invalid theme; the customizer and the
/// style application path both refuse one.
pub fn validate_theme(theme: &ThemeConfig) -> ThemeValidation {
    let mut errors = Vec::new();

    if theme.id.trim().is_empty() {
        errors.push("Theme ID is required".to_string());
    }
    if theme.name.trim().is_empty() {
        errors.push("Theme name is required".to_string());
    }
    if theme.description.trim().is_empty() {
        errors.push("Theme description is required".to_string());
    }

    for (role, color) in theme.colors.entries() {
        if color.is_empty() {
            errors.push(format!("Missing required color: {}", role));
        } else if !is_valid_color(color) {
            errors.push(format!("Invalid color format for {}: {}", role, color));
        }
    }

    ThemeValidation {
        valid: errors.is_empty(),
        errors,
    }
}
