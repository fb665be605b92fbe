//! Layout constants for the snapshot renderers, bundled into named presets.
//!
//! Every number the renderers use to place something lives here, so a new
//! look is a new preset rather than another copy of the drawing code.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Space added around the measured readout text to form its pill.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockStyle {
    /// Opacity of the corner gradients behind the clock.
    pub background_strength: f32,
    pub heading_baseline: f32,
    pub heading_font_px: f32,
    pub heading_line_height: f32,
    pub heading_letter_spacing_em: f32,
    /// Extra drop between the last heading line and the readout baseline.
    pub readout_gap: f32,
    pub readout_font_px: f32,
    pub pill_padding: Padding,
    pub pill_radius: f32,
    /// Face centre sits this far below the vertical middle of the canvas.
    pub face_offset_y: f32,
    pub face_radius: f32,
    pub hour_hand_ratio: f32,
    pub minute_hand_ratio: f32,
    pub hand_width: f32,
    pub hand_stripe: bool,
    pub pivot_radius: f32,
    pub pivot_stroke: f32,
    pub day_night_dial: bool,
    pub signature_font_px: f32,
    pub signature_bottom: f32,
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self {
            background_strength: 0.5,
            heading_baseline: 320.0,
            heading_font_px: 200.0,
            heading_line_height: 200.0,
            heading_letter_spacing_em: -0.02,
            readout_gap: 10.0,
            readout_font_px: 140.0,
            pill_padding: Padding {
                x: 0.0,
                top: 10.0,
                bottom: 50.0,
            },
            pill_radius: 28.0,
            face_offset_y: 340.0,
            face_radius: 420.0,
            hour_hand_ratio: 0.5,
            minute_hand_ratio: 0.8,
            hand_width: 24.0,
            hand_stripe: true,
            pivot_radius: 18.0,
            pivot_stroke: 5.0,
            day_night_dial: false,
            signature_font_px: 55.0,
            signature_bottom: 80.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridBackground {
    Plain,
    Layered { strength: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub background: GridBackground,
    pub content_top: f32,
    pub title_font_px: f32,
    pub title_letter_spacing_em: f32,
    pub title_baseline_offset: f32,
    pub summary_font_px: f32,
    pub summary_letter_spacing_em: f32,
    pub summary_baseline_offset: f32,
    pub grid_offset: f32,
    /// Horizontal room the grid leaves free in total (both sides).
    pub side_margin: f32,
    pub bottom_reserve: f32,
    pub base_cell: f32,
    pub base_gap: f32,
    pub decade_gap: f32,
    pub rows_per_decade: u32,
    pub max_scale: f32,
    pub min_cell: f32,
    pub stroke_width: f32,
    pub upcoming_alpha: f32,
    pub beyond_alpha: f32,
    pub signature_font_px: f32,
    pub signature_right: f32,
    pub signature_bottom: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            background: GridBackground::Plain,
            content_top: 20.0,
            title_font_px: 130.0,
            title_letter_spacing_em: -0.02,
            title_baseline_offset: 160.0,
            summary_font_px: 55.0,
            summary_letter_spacing_em: -0.02,
            summary_baseline_offset: 240.0,
            grid_offset: 300.0,
            side_margin: 120.0,
            bottom_reserve: 100.0,
            base_cell: 14.0,
            base_gap: 2.0,
            decade_gap: 4.0,
            rows_per_decade: 10,
            max_scale: 1.4,
            min_cell: 8.0,
            stroke_width: 1.0,
            upcoming_alpha: 0.5,
            beyond_alpha: 0.15,
            signature_font_px: 55.0,
            signature_right: 60.0,
            signature_bottom: 80.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetName {
    /// Tall poster look: bottom-heavy readout pill, plain grid backdrop.
    Story,
    /// Symmetric pill, day/night dial, gradient behind the grid too.
    Balanced,
}

impl FromStr for PresetName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "story" => Ok(PresetName::Story),
            "balanced" => Ok(PresetName::Balanced),
            other => Err(format!("unknown style preset `{other}`")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StylePreset {
    pub name: PresetName,
    pub signature: String,
    #[serde(default)]
    pub clock: ClockStyle,
    #[serde(default)]
    pub grid: GridStyle,
}

impl StylePreset {
    pub fn story() -> Self {
        Self {
            name: PresetName::Story,
            signature: "startnow.life".to_string(),
            clock: ClockStyle::default(),
            grid: GridStyle::default(),
        }
    }

    pub fn balanced() -> Self {
        let mut preset = Self::story();
        preset.name = PresetName::Balanced;
        preset.clock.pill_padding = Padding {
            x: 36.0,
            top: 18.0,
            bottom: 18.0,
        };
        preset.clock.day_night_dial = true;
        preset.clock.background_strength = 0.8;
        preset.grid.background = GridBackground::Layered { strength: 0.35 };
        preset
    }

    pub fn named(name: PresetName) -> Self {
        match name {
            PresetName::Story => Self::story(),
            PresetName::Balanced => Self::balanced(),
        }
    }
}

impl Default for StylePreset {
    fn default() -> Self {
        Self::story()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_parse() {
        assert_eq!("Story".parse::<PresetName>(), Ok(PresetName::Story));
        assert_eq!(" balanced ".parse::<PresetName>(), Ok(PresetName::Balanced));
        assert!("poster".parse::<PresetName>().is_err());
    }

    #[test]
    fn presets_differ_only_where_intended() {
        let story = StylePreset::story();
        let balanced = StylePreset::balanced();
        assert_eq!(story.clock.face_radius, balanced.clock.face_radius);
        assert_ne!(story.clock.pill_padding, balanced.clock.pill_padding);
        assert_eq!(story.grid.max_scale, balanced.grid.max_scale);
    }

    #[test]
    fn presets_deserialize_with_partial_overrides() {
        let json = r#"{
            "name": "story",
            "signature": "example.org",
            "clock": { "pill_radius": 12.0 },
            "grid": { "background": { "kind": "layered", "strength": 0.2 } }
        }"#;
        let preset: StylePreset = serde_json::from_str(json).expect("valid preset");
        assert_eq!(preset.clock.pill_radius, 12.0);
        assert_eq!(preset.clock.face_radius, 420.0);
        assert_eq!(preset.grid.background, GridBackground::Layered { strength: 0.2 });
        assert_eq!(preset.grid.base_cell, 14.0);
    }
}
