//! Accepted color grammars.

use regex::Regex;
use std::sync::OnceLock;

const OKLCH_PATTERN: &str = r"^oklch\([0-9.]+ [0-9.]+ [0-9.]+( / [0-9.]+%?)?\)$";
const RGB_PATTERN: &str = r"^rgb\([0-9]+,\s*[0-9]+,\s*[0-9]+\)$";
const HSL_PATTERN: &str = r"^hsl\([0-9]+,\s*[0-9]+%,\s*[0-9]+%\)$";
const HEX_PATTERN: &str = r"^#[0-9A-Fa-f]{6}$";

static OKLCH_RE: OnceLock<Option<Regex>> = OnceLock::new();
static RGB_RE: OnceLock<Option<Regex>> = OnceLock::new();
static HSL_RE: OnceLock<Option<Regex>> = OnceLock::new();
static HEX_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, input: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(input))
}

/// Textual color format of a theme token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// `oklch(0.5 0.1 180)` or `oklch(1 0 0 / 10%)`
    Oklch,
    /// `rgb(255, 255, 255)`
    Rgb,
    /// `hsl(180, 50%, 50%)`
    Hsl,
    /// `#ffffff`
    Hex,
}

impl ColorFormat {
    /// Detect which grammar `color` matches in full, if any.
    pub fn detect(color: &str) -> Option<Self> {
        if matches(&OKLCH_RE, OKLCH_PATTERN, color) {
            Some(ColorFormat::Oklch)
        } else if matches(&RGB_RE, RGB_PATTERN, color) {
            Some(ColorFormat::Rgb)
        } else if matches(&HSL_RE, HSL_PATTERN, color) {
            Some(ColorFormat::Hsl)
        } else if matches(&HEX_RE, HEX_PATTERN, color) {
            Some(ColorFormat::Hex)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorFormat::Oklch => "oklch",
            ColorFormat::Rgb => "rgb",
            ColorFormat::Hsl => "hsl",
            ColorFormat::Hex => "hex",
        }
    }
}

/// True iff `color` matches one of the accepted grammars exactly.
pub fn is_valid_color(color: &str) -> bool {
    ColorFormat::detect(color).is_some()
}
