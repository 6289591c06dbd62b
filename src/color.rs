use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use space_missions::data::MissionStatus;

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

// ---------------------------------------------------------------------------
// Color mapping: company → Color32
// ---------------------------------------------------------------------------

/// Assigns each company a distinct, stable colour (hues follow name order).
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(companies: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = companies.into_iter().collect();
        let mapping = names
            .iter()
            .zip(generate_palette(names.len()))
            .map(|(name, c)| (name.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, company: &str) -> Color32 {
        self.mapping
            .get(company)
            .copied()
            .unwrap_or(self.default_color)
    }
}

/// Fixed colour per launch outcome, used by the chart and the status filter.
pub fn status_color(status: MissionStatus) -> Color32 {
    match status {
        MissionStatus::Success => Color32::from_rgb(0x66, 0xc2, 0xa5),
        MissionStatus::Failure => Color32::from_rgb(0xfc, 0x8d, 0x62),
        MissionStatus::PartialFailure => Color32::from_rgb(0x8d, 0xa0, 0xcb),
        MissionStatus::PrelaunchFailure => Color32::from_rgb(0xe7, 0x8a, 0xc3),
    }
}
