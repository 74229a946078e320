//! Approximate HEX <-> OKLCH conversion.
//!
//! This is an HSL-style mapping, not a colorimetric transform: lightness
//! is `(max + min) / 2` of the RGB channels, chroma is `(max - min) * 0.4`
//! and hue comes from the RGB hexcone. Shared theme URLs carry values
//! produced this way, so the mapping must stay stable.
//!
//! `oklch_to_hex` inverts the same mapping. Because `hex_to_oklch` rounds
//! to three decimals (one for hue), a HEX -> OKLCH -> HEX round trip may
//! move each channel by one step; OKLCH -> HEX -> OKLCH is only close,
//! never exact, and nothing should rely on it.

use crate::oklch::{parse_oklch, MAX_CHROMA};

fn hex_channels(hex: &str) -> Option<(f64, f64, f64)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map(|v| f64::from(v) / 255.0)
    };
    Some((channel(0..2).ok()?, channel(2..4).ok()?, channel(4..6).ok()?))
}

/// Convert `#rrggbb` (the `#` is optional) to an approximate OKLCH string.
///
/// Returns `None` for anything that is not six hex digits.
pub fn hex_to_oklch(hex: &str) -> Option<String> {
    let (r, g, b) = hex_channels(hex)?;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;
    let chroma = max - min;

    let mut hue = 0.0;
    if chroma != 0.0 {
        hue = if max == r {
            ((g - b) / chroma) % 6.0
        } else if max == g {
            (b - r) / chroma + 2.0
        } else {
            (r - g) / chroma + 4.0
        };
        hue *= 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }
    }

    Some(format!(
        "oklch({:.3} {:.3} {:.1})",
        lightness,
        chroma * MAX_CHROMA,
        hue
    ))
}

/// Inverse of [`hex_to_oklch`]'s approximation, producing `#rrggbb`.
///
/// Returns `None` when `color` is not OKLCH. Alpha is ignored.
pub fn oklch_to_hex(color: &str) -> Option<String> {
    let parsed = parse_oklch(color)?;

    let chroma = (parsed.c / MAX_CHROMA).clamp(0.0, 1.0);
    let min = parsed.l - chroma / 2.0;
    let sector = parsed.h.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_byte = |v: f64| ((v + min).clamp(0.0, 1.0) * 255.0).round() as u8;
    Some(format!(
        "#{:02x}{:02x}{:02x}",
        to_byte(r),
        to_byte(g),
        to_byte(b)
    ))
}
