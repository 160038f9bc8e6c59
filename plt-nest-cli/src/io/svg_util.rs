use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgDrawOptions {
    pub theme: SvgLayoutThemes,
    /// Draws the plotter strokes of every piece on top of its bounding box
    pub outlines: bool,
    /// Draws the name of every piece at the center of its bounding box
    pub labels: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutThemes::default(),
            outlines: true,
            labels: true,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum SvgLayoutThemes {
    #[default]
    EarthTones,
    Gray,
}

impl SvgLayoutThemes {
    pub fn get_theme(&self) -> SvgLayoutTheme {
        match self {
            SvgLayoutThemes::EarthTones => SvgLayoutTheme::EARTH_TONES,
            SvgLayoutThemes::Gray => SvgLayoutTheme::GRAY,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub fabric_fill: &'static str,
    pub large_piece_fill: &'static str,
    pub small_piece_fill: &'static str,
    pub outline_stroke: &'static str,
}

impl SvgLayoutTheme {
    pub const EARTH_TONES: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        fabric_fill: "#CC824A",
        large_piece_fill: "#FFC879",
        small_piece_fill: "#FFE3B8",
        outline_stroke: "#2D2D2D",
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.5,
        fabric_fill: "#D3D3D3",
        large_piece_fill: "#8F8F8F",
        small_piece_fill: "#B5B5B5",
        outline_stroke: "#000000",
    };
}

/// Scales the RGB channels of a `#RRGGBB` color by `fraction`. Returns `None` for malformed colors.
pub fn change_brightness(color: &str, fraction: f64) -> Option<String> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| -> Option<u8> {
        let c = u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?;
        Some((c as f64 * fraction).clamp(0.0, 255.0) as u8)
    };
    Some(format!(
        "#{:02X}{:02X}{:02X}",
        channel(0)?,
        channel(2)?,
        channel(4)?
    ))
}
