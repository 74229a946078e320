//! WCAG-style contrast checks.
//!
//! Luminance is approximated by the OKLCH lightness component instead of
//! true relative luminance, so ratios are indicative only.

use crate::oklch::parse_oklch;

const AA_NORMAL: f64 = 4.5;
const AA_LARGE: f64 = 3.0;
const AAA_NORMAL: f64 = 7.0;
const AAA_LARGE: f64 = 4.5;

/// Approximate luminance of `color`; `0.5` when it is not OKLCH.
pub fn relative_luminance(color: &str) -> f64 {
    parse_oklch(color).map_or(0.5, |c| c.l)
}

/// `(lighter + 0.05) / (darker + 0.05)`.
pub fn contrast_ratio(color1: &str, color2: &str) -> f64 {
    let l1 = relative_luminance(color1);
    let l2 = relative_luminance(color2);

    let lighter = l1.max(l2);
    let darker = l1.min(l2);

    (lighter + 0.05) / (darker + 0.05)
}

pub fn meets_wcag_aa(foreground: &str, background: &str, large_text: bool) -> bool {
    let threshold = if large_text { AA_LARGE } else { AA_NORMAL };
    contrast_ratio(foreground, background) >= threshold
}

pub fn meets_wcag_aaa(foreground: &str, background: &str, large_text: bool) -> bool {
    let threshold = if large_text { AAA_LARGE } else { AAA_NORMAL };
    contrast_ratio(foreground, background) >= threshold
}
