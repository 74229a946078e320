//! Theme customization state for folio.
//!
//! [`ThemeCustomization`] owns the visitor's theme selection and custom
//! themes on top of an injected storage medium.

mod customization;

use std::fmt;
use std::str::FromStr;

pub use customization::ThemeCustomization;

/// Light/dark switch reported by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseMode {
    Light,
    Dark,
}

impl BaseMode {
    /// Id of the built-in theme that mirrors this mode.
    pub fn theme_id(self) -> &'static str {
        match self {
            BaseMode::Light => "light",
            BaseMode::Dark => "dark",
        }
    }
}

impl fmt::Display for BaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.theme_id())
    }
}

impl FromStr for BaseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(BaseMode::Light),
            "dark" => Ok(BaseMode::Dark),
            other => Err(format!("Unknown mode '{}', expected light or dark", other)),
        }
    }
}
