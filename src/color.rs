use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Brand palette
// ---------------------------------------------------------------------------

pub const DARK_BLUE: Color32 = Color32::from_rgb(0x1C, 0x4E, 0x80);
pub const VIVID_BLUE: Color32 = Color32::from_rgb(0x00, 0x91, 0xD5);
pub const LIGHT_BLUE: Color32 = Color32::from_rgb(0xA5, 0xD8, 0xDD);
pub const ORANGE: Color32 = Color32::from_rgb(0xEA, 0x6A, 0x47);
pub const GRAY_BLUE: Color32 = Color32::from_rgb(0x7E, 0x90, 0x9A);

/// Series colours used before falling back to generated hues.
const BRAND_SEQUENCE: [Color32; 5] = [DARK_BLUE, VIVID_BLUE, LIGHT_BLUE, ORANGE, GRAY_BLUE];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// `n` series colours: the brand sequence first, generated hues when a
/// chart has more groups than brand colours.
pub fn series_colors(n: usize) -> Vec<Color32> {
    if n <= BRAND_SEQUENCE.len() {
        BRAND_SEQUENCE[..n].to_vec()
    } else {
        generate_palette(n)
    }
}

// ---------------------------------------------------------------------------
// Sequential scale for heatmaps
// ---------------------------------------------------------------------------

const VIRIDIS: [(u8, u8, u8); 5] = [
    (0x44, 0x01, 0x54),
    (0x3B, 0x52, 0x8B),
    (0x21, 0x91, 0x8C),
    (0x5E, 0xC9, 0x62),
    (0xFD, 0xE7, 0x25),
];

/// Map `t` in `[0, 1]` onto a viridis-like ramp, interpolating in linear RGB.
pub fn sequential(t: f32) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f32;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as f32;

    let linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = linear(VIRIDIS[lo]).mix(linear(VIRIDIS[lo + 1]), frac);
    let rgb: Srgb = Srgb::from_linear(mixed);
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Text colour that stays readable on top of `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let luma = 0.299 * f32::from(background.r())
        + 0.587 * f32::from(background.g())
        + 0.114 * f32::from(background.b());
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

// ---------------------------------------------------------------------------
// Color mapping: group name → Color32
// ---------------------------------------------------------------------------

/// Maps group names (departments, genders, …) to distinct colours so the
/// same group keeps its colour across charts.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the sorted distinct names.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        let names: Vec<&String> = names.into_iter().collect();
        let mapping = names
            .iter()
            .zip(series_colors(names.len()))
            .map(|(name, c)| ((*name).clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a group name.
    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping
            .get(name)
            .copied()
            .unwrap_or(self.default_color)
    }
}
