//! Named color tokens resolved at render time.
//!
//! Token names mirror the custom properties of the page stylesheet so a
//! theme can be exported from CSS and dropped in as JSON.

use std::fmt;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tiny_skia::Color;

/// Opaque sRGB color written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn opaque(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, 255)
    }

    /// The same color at `alpha` (clamped to 0..=1).
    pub fn with_alpha(self, alpha: f32) -> Color {
        let mut color = self.opaque();
        color.set_alpha(alpha.clamp(0.0, 1.0));
        color
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse_hex(&value).ok_or_else(|| format!("invalid color `{value}`, expected #rrggbb"))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Color tokens consumed by the snapshot renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Theme {
    pub bg_a1: Rgb,
    pub bg_a2: Rgb,
    pub bg_b1: Rgb,
    pub bg_b2: Rgb,
    pub bg_c1: Rgb,
    pub bg_c2: Rgb,
    pub bg_d1: Rgb,
    pub bg_d2: Rgb,
    pub bg_d3: Rgb,
    pub accent: Rgb,
    pub accent_2: Rgb,
    pub accent_4: Rgb,
    pub text: Rgb,
    pub white: Rgb,
    pub muted: Rgb,
    pub filled_grad_start: Rgb,
    pub filled_grad_end: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_a1: Rgb::new(0xf3, 0xf7, 0xff),
            bg_a2: Rgb::new(0xd8, 0xe7, 0xf6),
            bg_b1: Rgb::new(0xee, 0xf8, 0xff),
            bg_b2: Rgb::new(0xcf, 0xe8, 0xf6),
            bg_c1: Rgb::new(0xe2, 0xf1, 0xfb),
            bg_c2: Rgb::new(0xc4, 0xe0, 0xf2),
            bg_d1: Rgb::new(0xd7, 0xec, 0xf7),
            bg_d2: Rgb::new(0xb9, 0xd6, 0xea),
            bg_d3: Rgb::new(0xa9, 0xc8, 0xdc),
            accent: Rgb::new(0x33, 0xcc, 0x99),
            accent_2: Rgb::new(0xf9, 0x73, 0x16),
            accent_4: Rgb::new(0xf2, 0x6d, 0x7d),
            text: Rgb::new(0x0f, 0x17, 0x2a),
            white: Rgb::WHITE,
            muted: Rgb::new(0xa4, 0xac, 0xb6),
            filled_grad_start: Rgb::new(0xff, 0xc8, 0xc8),
            filled_grad_end: Rgb::new(0x0c, 0x59, 0xc4),
        }
    }
}

#[derive(Embed)]
#[folder = "assets/theme"]
struct ThemeAssets;

const BUNDLED_TOKENS: &str = "tokens.json";

impl Theme {
    /// Parse a token file; tokens it omits keep their default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The token file shipped with the crate, or the built-in defaults if it
    /// is missing or unreadable.
    pub fn bundled() -> Self {
        let Some(file) = ThemeAssets::get(BUNDLED_TOKENS) else {
            log::warn!("[render] bundled {BUNDLED_TOKENS} missing; using default theme");
            return Self::default();
        };
        let parsed = std::str::from_utf8(&file.data)
            .map_err(|err| err.to_string())
            .and_then(|json| Self::from_json(json).map_err(|err| err.to_string()));
        parsed.unwrap_or_else(|err| {
            log::warn!("[render] bundled {BUNDLED_TOKENS} unreadable ({err}); using default theme");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Rgb::parse_hex("#0f172a"), Some(Rgb::new(15, 23, 42)));
        assert_eq!(Rgb::parse_hex("FFFFFF"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse_hex("#fff"), None);
        assert_eq!(Rgb::parse_hex("#gg0000"), None);
    }

    #[test]
    fn bundled_tokens_match_defaults() {
        assert_eq!(Theme::bundled(), Theme::default());
    }

    #[test]
    fn partial_token_files_keep_defaults() {
        let theme = Theme::from_json(r##"{ "text": "#101010", "accent-2": "#000000" }"##)
            .expect("valid tokens");
        assert_eq!(theme.text, Rgb::new(16, 16, 16));
        assert_eq!(theme.accent_2, Rgb::new(0, 0, 0));
        assert_eq!(theme.muted, Theme::default().muted);
    }

    #[test]
    fn rejects_bad_tokens() {
        assert!(Theme::from_json(r#"{ "text": "navy" }"#).is_err());
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Rgb::WHITE.with_alpha(2.0).alpha(), 1.0);
        assert_eq!(Rgb::WHITE.with_alpha(-1.0).alpha(), 0.0);
    }
}
