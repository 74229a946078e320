//! Theme loading from TOML and JSON files.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::model::ThemeConfig;

/// On-disk theme encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFormat {
    Toml,
    Json,
}

impl ThemeFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(ThemeFormat::Toml),
            "json" => Some(ThemeFormat::Json),
            _ => None,
        }
    }
}

/// Parse a theme from a string.
pub fn load_theme_from_str(content: &str, format: ThemeFormat) -> Result<ThemeConfig> {
    let theme = match format {
        ThemeFormat::Toml => toml::from_str(content)?,
        ThemeFormat::Json => serde_json::from_str(content)?,
    };
    Ok(theme)
}

/// Load a theme from a `.toml` or `.json` file.
pub fn load_theme(path: &Path) -> Result<ThemeConfig> {
    let Some(format) = ThemeFormat::from_path(path) else {
        bail!("Unsupported theme file: {}", path.display());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme file: {}", path.display()))?;
    load_theme_from_str(&content, format)
        .with_context(|| format!("Failed to parse theme file: {}", path.display()))
}
