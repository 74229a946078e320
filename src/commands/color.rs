use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use std::io::Write;

use folio_color::{
    adjust_chroma, adjust_lightness, contrast_ratio, hex_to_oklch, meets_wcag_aa, meets_wcag_aaa,
    oklch_to_hex, parse_oklch, rotate_hue, ColorFormat,
};

#[derive(Debug, Subcommand)]
pub enum ColorCommand {
    /// Convert between hex and OKLCH (approximate).
    Convert { color: String },

    /// WCAG contrast of two OKLCH colors.
    Contrast {
        foreground: String,
        background: String,
        /// Use the large-text thresholds
        #[arg(long)]
        large: bool,
    },

    /// Shift the components of an OKLCH color.
    Adjust {
        color: String,
        #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
        lightness: f64,
        #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
        chroma: f64,
        /// Degrees to rotate the hue by
        #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
        hue: f64,
    },
}

fn verdict(pass: bool) -> &'static str {
    if pass {
        "pass"
    } else {
        "fail"
    }
}

pub fn run(command: ColorCommand, out: &mut dyn Write) -> Result<()> {
    match command {
        ColorCommand::Convert { color } => {
            let color = color.trim();
            let converted = match ColorFormat::detect(color) {
                Some(ColorFormat::Hex) => hex_to_oklch(color),
                Some(ColorFormat::Oklch) => oklch_to_hex(color),
                Some(other) => bail!("Cannot convert {} colors", other.name()),
                None => bail!("Not a color: {}", color),
            };
            let converted = converted.ok_or_else(|| anyhow!("Cannot convert {}", color))?;
            writeln!(out, "{}", converted)?;
        }

        ColorCommand::Contrast {
            foreground,
            background,
            large,
        } => {
            for color in [&foreground, &background] {
                if parse_oklch(color).is_none() {
                    bail!("Not an OKLCH color: {}", color);
                }
            }
            let ratio = contrast_ratio(&foreground, &background);
            writeln!(out, "ratio: {:.2}", ratio)?;
            writeln!(out, "AA:    {}", verdict(meets_wcag_aa(&foreground, &background, large)))?;
            writeln!(out, "AAA:   {}", verdict(meets_wcag_aaa(&foreground, &background, large)))?;
        }

        ColorCommand::Adjust {
            color,
            lightness,
            chroma,
            hue,
        } => {
            if parse_oklch(&color).is_none() {
                bail!("Not an OKLCH color: {}", color);
            }
            let mut adjusted = color;
            if lightness != 0.0 {
                adjusted = adjust_lightness(&adjusted, lightness);
            }
            if chroma != 0.0 {
                adjusted = adjust_chroma(&adjusted, chroma);
            }
            if hue != 0.0 {
                adjusted = rotate_hue(&adjusted, hue);
            }
            writeln!(out, "{}", adjusted)?;
        }
    }

    Ok(())
}
