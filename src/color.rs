use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// An 8-bit sRGB series colour.
pub type SeriesColor = Srgb<u8>;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<SeriesColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Colour names → SeriesColor
// ---------------------------------------------------------------------------

/// Parse `#rrggbb`, `#rgb` or a CSS colour name (`maroon`, `snow`, ...).
pub fn parse_color(s: &str) -> Option<SeriesColor> {
    let s = s.trim();
    if s.starts_with('#') {
        return Srgb::<u8>::from_str(s).ok();
    }
    palette::named::from_str(&s.to_ascii_lowercase())
}

/// Resolve configured colour names into a non-empty palette.
///
/// Entries that fail to parse are replaced by a generated hue so that the
/// palette length (and thus the group → colour cycle) is preserved.
pub fn resolve_palette(names: &[String]) -> Vec<SeriesColor> {
    if names.is_empty() {
        return generate_palette(9);
    }
    let fallback = generate_palette(names.len());
    names
        .iter()
        .zip(fallback)
        .map(|(name, generated)| {
            parse_color(name).unwrap_or_else(|| {
                log::warn!("Unknown colour '{name}', using a generated one");
                generated
            })
        })
        .collect()
}

/// Convert to an egui colour with the given opacity in `0..=1`.
pub fn to_color32(c: SeriesColor, opacity: f64) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(c.red, c.green, c.blue, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(parse_color("#49B6FF"), Some(Srgb::new(0x49, 0xB6, 0xFF)));
        assert_eq!(parse_color("maroon"), Some(Srgb::new(128, 0, 0)));
        assert_eq!(parse_color("Navy"), Some(Srgb::new(0, 0, 128)));
        assert_eq!(parse_color("not-a-colour"), None);
    }

    #[test]
    fn unknown_names_keep_palette_length() {
        let names = vec!["#000000".to_string(), "bogus".to_string()];
        let pal = resolve_palette(&names);
        assert_eq!(pal.len(), 2);
        assert_eq!(pal[0], Srgb::new(0, 0, 0));
    }

    #[test]
    fn empty_palette_falls_back_to_generated() {
        assert_eq!(resolve_palette(&[]).len(), 9);
    }
}
