use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uncased::{Uncased, UncasedStr};

// Govee reports and accepts colors as a single integer laid out
// as 0xRRGGBB. Channels outside 0-255 are masked down to their low
// 8 bits rather than rejected, which matches what the devices do
// with out of range input.

/// The largest value a packed color can take
pub const MAX_PACKED: u32 = 0xFF_FF_FF;

/// A structured color triple. The channels are nominally 0-255,
/// but construction does not clamp; see [`encode`] for how out of
/// range channels are treated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl RgbColor {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    pub fn to_packed(&self) -> u32 {
        encode(*self)
    }

    /// Returns true if every channel already fits in 8 bits
    pub fn is_in_range(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0..=255).contains(c))
    }
}

impl std::fmt::Display for RgbColor {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "#{:06x}", self.to_packed())
    }
}

impl From<csscolorparser::Color> for RgbColor {
    fn from(color: csscolorparser::Color) -> Self {
        let [r, g, b, _a] = color.to_rgba8();
        Self::new(r.into(), g.into(), b.into())
    }
}

/// Pack a color into its 0xRRGGBB wire form
pub fn encode(color: RgbColor) -> u32 {
    let r = (color.r & 0xff) as u32;
    let g = (color.g & 0xff) as u32;
    let b = (color.b & 0xff) as u32;
    (r << 16) | (g << 8) | b
}

/// Unpack a 0xRRGGBB integer. Bits above 23 are ignored; negative
/// inputs are treated as their two's complement bit pattern.
pub fn decode(packed: i64) -> RgbColor {
    RgbColor {
        r: ((packed >> 16) & 0xff) as i32,
        g: ((packed >> 8) & 0xff) as i32,
        b: (packed & 0xff) as i32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub color: RgbColor,
}

const fn preset(name: &'static str, r: i32, g: i32, b: i32) -> ColorPreset {
    ColorPreset {
        name,
        color: RgbColor::new(r, g, b),
    }
}

/// Convenience names for commonly used colors.
/// This is not validated against and not exhaustive.
pub const COLOR_PRESETS: &[ColorPreset] = &[
    preset("Warm White", 255, 180, 107),
    preset("Soft White", 255, 214, 170),
    preset("Cool White", 201, 226, 255),
    preset("Red", 255, 0, 0),
    preset("Orange", 255, 128, 0),
    preset("Yellow", 255, 255, 0),
    preset("Green", 0, 255, 0),
    preset("Cyan", 0, 255, 255),
    preset("Blue", 0, 0, 255),
    preset("Purple", 128, 0, 255),
    preset("Pink", 255, 105, 180),
];

static PRESETS_BY_NAME: Lazy<HashMap<Uncased<'static>, RgbColor>> = Lazy::new(|| {
    COLOR_PRESETS
        .iter()
        .map(|p| (Uncased::from_borrowed(p.name), p.color))
        .collect()
});

/// Look up a preset by name, ignoring case
pub fn color_preset(name: &str) -> Option<RgbColor> {
    PRESETS_BY_NAME.get(UncasedStr::new(name.trim())).copied()
}

/// Resolve a preset name or any CSS color specification
pub fn parse_color(color: &str) -> anyhow::Result<RgbColor> {
    if let Some(preset) = color_preset(color) {
        return Ok(preset);
    }
    let parsed = csscolorparser::parse(color)
        .map_err(|err| anyhow::anyhow!("error parsing color '{color}': {err}"))?;
    Ok(parsed.into())
}
