//! OKLCH parsing, formatting and adjustment.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Upper bound used when clamping chroma.
pub const MAX_CHROMA: f64 = 0.4;

static OKLCH_CLAUSE: OnceLock<Option<Regex>> = OnceLock::new();

/// Parsed OKLCH components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness, nominally in `[0, 1]`
    pub l: f64,
    /// Chroma, nominally in `[0, 0.4]`
    pub c: f64,
    /// Hue in degrees
    pub h: f64,
    /// Alpha as a percentage
    pub alpha: Option<f64>,
}

impl Oklch {
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h, alpha: None }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({} {} {}", num(self.l), num(self.c), num(self.h))?;
        if let Some(alpha) = self.alpha {
            write!(f, " / {}%", num(alpha))?;
        }
        write!(f, ")")
    }
}

impl FromStr for Oklch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_oklch(s).ok_or_else(|| format!("Not an OKLCH color: {}", s))
    }
}

/// Shortest decimal form, `0` for negative zero.
fn num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Parse the longest leading decimal of a `[0-9.]+` capture.
///
/// `"1.2.3"` reads as `1.2`; a capture with no digits before the first
/// stray dot yields `None`.
fn leading_float(text: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, ch) in text.char_indices() {
        match ch {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    text[..end].parse().ok()
}

/// Extract OKLCH components from the first `oklch(...)` clause in `color`.
///
/// Returns `None` when there is no such clause; callers treat that as
/// "leave the color unchanged".
pub fn parse_oklch(color: &str) -> Option<Oklch> {
    let re = OKLCH_CLAUSE
        .get_or_init(|| {
            Regex::new(r"oklch\(([0-9.]+) ([0-9.]+) ([0-9.]+)( / ([0-9.]+)%?)?\)").ok()
        })
        .as_ref()?;
    let caps = re.captures(color)?;

    let l = leading_float(caps.get(1)?.as_str())?;
    let c = leading_float(caps.get(2)?.as_str())?;
    let h = leading_float(caps.get(3)?.as_str())?;
    let alpha = match caps.get(5) {
        Some(m) => Some(leading_float(m.as_str())?),
        None => None,
    };

    Some(Oklch { l, c, h, alpha })
}

/// Format OKLCH components; the alpha clause is omitted when `alpha` is `None`.
pub fn create_oklch(l: f64, c: f64, h: f64, alpha: Option<f64>) -> String {
    Oklch { l, c, h, alpha }.to_string()
}

/// Shift lightness by `amount`, clamped to `[0, 1]`.
pub fn adjust_lightness(color: &str, amount: f64) -> String {
    match parse_oklch(color) {
        Some(parsed) => Oklch {
            l: (parsed.l + amount).clamp(0.0, 1.0),
            ..parsed
        }
        .to_string(),
        None => color.to_string(),
    }
}

/// Shift chroma by `amount`, clamped to `[0, MAX_CHROMA]`.
pub fn adjust_chroma(color: &str, amount: f64) -> String {
    match parse_oklch(color) {
        Some(parsed) => Oklch {
            c: (parsed.c + amount).clamp(0.0, MAX_CHROMA),
            ..parsed
        }
        .to_string(),
        None => color.to_string(),
    }
}

/// Rotate hue by `degrees`, wrapped into `[0, 360)`.
pub fn rotate_hue(color: &str, degrees: f64) -> String {
    match parse_oklch(color) {
        Some(parsed) => Oklch {
            h: wrap_hue(parsed.h + degrees),
            ..parsed
        }
        .to_string(),
        None => color.to_string(),
    }
}

fn wrap_hue(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
