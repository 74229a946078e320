//! Color utilities for folio themes.
//!
//! Theme tokens are plain strings in one of four textual formats (OKLCH,
//! RGB, HSL, HEX). OKLCH is the canonical format: it can be parsed,
//! adjusted and reformatted. Conversions and contrast checks here are
//! deliberate approximations and are not colorimetrically exact.

mod contrast;
mod convert;
mod format;
mod oklch;

pub use contrast::{contrast_ratio, meets_wcag_aa, meets_wcag_aaa, relative_luminance};
pub use convert::{hex_to_oklch, oklch_to_hex};
pub use format::{is_valid_color, ColorFormat};
pub use oklch::{
    adjust_chroma, adjust_lightness, create_oklch, parse_oklch, rotate_hue, Oklch, MAX_CHROMA,
};
