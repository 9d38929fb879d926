use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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

/// The same hue, darker; used for the "40 and under" half of a gender pair.
pub fn dimmed(color: Color32) -> Color32 {
    Color32::from_rgb(
        (color.r() as f32 * 0.6) as u8,
        (color.g() as f32 * 0.6) as u8,
        (color.b() as f32 * 0.6) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: gender → Color32
// ---------------------------------------------------------------------------

/// Maps each gender of a summary to a distinct colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(genders: impl IntoIterator<Item = &'a str>) -> Self {
        let genders: Vec<&str> = genders.into_iter().collect();
        let palette = generate_palette(genders.len());
        let mapping = genders
            .into_iter()
            .zip(palette)
            .map(|(g, c)| (g.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given gender.
    pub fn color_for(&self, gender: &str) -> Color32 {
        self.mapping
            .get(gender)
            .copied()
            .unwrap_or(self.default_color)
    }
}
