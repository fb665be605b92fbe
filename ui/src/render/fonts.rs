//! Font loading, measurement and glyph painting for the snapshot renderers.
//!
//! Faces are resolved in this order:
//! 1. with the `embed_font` feature, DejaVu Sans and DejaVu Sans Bold
//!    bundled under `ui/assets/fonts/` (the web build always enables it);
//! 2. on native targets, the font file named by `STARTNOW_FONT` (both
//!    weights map to the same file);
//! 3. on native targets, the closest installed sans-serif per weight,
//!    found through `fontdb`;
//! 4. the built-in block glyphs from [`super::blockfont`].
//!
//! Whatever gets picked, it is picked once per [`Fonts`] instance, so two
//! renders through the same session use identical glyphs.

use std::fmt;

use fontdue::{Font, FontSettings};
use tiny_skia::{Color, ColorU8, Paint, Pixmap, PixmapPaint, Transform};

use super::blockfont;
use super::text::{self, Align, GlyphMeasure};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Medium,
    SemiBold,
}

impl FontWeight {
    pub fn numeric(self) -> u16 {
        match self {
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontWeight::Medium => "Medium",
            FontWeight::SemiBold => "SemiBold",
        })
    }
}

/// How a run of text is set: weight, size, tracking and anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size_px: f32,
    pub spacing_em: f32,
    pub align: Align,
}

impl TextStyle {
    pub fn new(weight: FontWeight, size_px: f32) -> Self {
        Self {
            weight,
            size_px,
            spacing_em: 0.0,
            align: Align::Left,
        }
    }

    pub fn spacing(mut self, spacing_em: f32) -> Self {
        self.spacing_em = spacing_em;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

enum Face {
    Vector(Box<Font>),
    Block,
}

impl GlyphMeasure for Face {
    fn advance(&self, ch: char, size_px: f32) -> f32 {
        match self {
            Face::Vector(font) => font.metrics(ch, size_px).advance_width,
            Face::Block => blockfont::advance(ch, size_px),
        }
    }
}

pub struct Fonts {
    medium: Face,
    semibold: Face,
}

impl fmt::Debug for Fonts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fonts")
            .field("vector", &self.has_vector_faces())
            .finish()
    }
}

impl Default for Fonts {
    fn default() -> Self {
        Self::load()
    }
}

/// Path of a font file used for every weight, when set.
#[cfg(not(target_arch = "wasm32"))]
pub const FONT_ENV: &str = "STARTNOW_FONT";

impl Fonts {
    pub fn load() -> Self {
        #[cfg(feature = "embed_font")]
        {
            if let Some(fonts) = Self::embedded() {
                return fonts;
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(path) = std::env::var_os(FONT_ENV) {
                let label = path.to_string_lossy().into_owned();
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        if let Some(font) = parse_face(&bytes, &label) {
                            return Self::uniform(font);
                        }
                    }
                    Err(err) => log::warn!("[render] {FONT_ENV} ({label}): {err}"),
                }
            }
            if let Some(fonts) = system::load() {
                return fonts;
            }
        }

        log::debug!("[render] no vector face available; using block glyphs");
        Self::block()
    }

    /// Block glyphs for every weight. Fully deterministic across machines.
    pub fn block() -> Self {
        Self {
            medium: Face::Block,
            semibold: Face::Block,
        }
    }

    /// The bundled DejaVu pair: Book for medium text, Bold for headings.
    #[cfg(feature = "embed_font")]
    pub fn embedded() -> Option<Self> {
        const BOOK: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
        const BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

        let medium = parse_face(BOOK, "DejaVuSans.ttf")?;
        let semibold = parse_face(BOLD, "DejaVuSans-Bold.ttf").unwrap_or_else(|| medium.clone());
        log::debug!("[render] using embedded DejaVu faces");
        Some(Self {
            medium: Face::Vector(Box::new(medium)),
            semibold: Face::Vector(Box::new(semibold)),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn uniform(font: Font) -> Self {
        Self {
            medium: Face::Vector(Box::new(font.clone())),
            semibold: Face::Vector(Box::new(font)),
        }
    }

    pub fn has_vector_faces(&self) -> bool {
        [&self.medium, &self.semibold]
            .iter()
            .any(|face| matches!(face, Face::Vector(_)))
    }

    fn face(&self, weight: FontWeight) -> &Face {
        match weight {
            FontWeight::Medium => &self.medium,
            FontWeight::SemiBold => &self.semibold,
        }
    }

    /// Ink extent of `text` above and below the baseline, when the face can
    /// report real glyph bounds.
    pub fn ink_extent(&self, weight: FontWeight, text: &str, size_px: f32) -> Option<(f32, f32)> {
        let Face::Vector(font) = self.face(weight) else {
            return None;
        };
        let mut ascent = 0.0f32;
        let mut descent = 0.0f32;
        let mut inked = false;
        for ch in text.chars().filter(|ch| !ch.is_whitespace()) {
            let m = font.metrics(ch, size_px);
            if m.width == 0 || m.height == 0 {
                continue;
            }
            inked = true;
            ascent = ascent.max(m.height as f32 + m.ymin as f32);
            descent = descent.max(-(m.ymin as f32));
        }
        inked.then_some((ascent, descent))
    }

    pub fn measure(&self, text: &str, style: TextStyle) -> f32 {
        text::measure_letter_spaced(
            self.face(style.weight),
            text,
            style.spacing_em,
            style.size_px,
        )
    }

    /// Paints `text` on one line with its baseline at `baseline`, anchored at
    /// `x` per `style.align`. Returns the width that was laid out.
    pub fn draw_text(
        &self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        baseline: f32,
        style: TextStyle,
        color: Color,
    ) -> f32 {
        let face = self.face(style.weight);
        let pens = text::layout_letter_spaced(
            face,
            text,
            x,
            style.spacing_em,
            style.size_px,
            style.align,
        );
        for (ch, pen) in pens {
            if ch.is_whitespace() {
                continue;
            }
            match face {
                Face::Vector(font) => {
                    draw_vector_glyph(pixmap, font, ch, pen, baseline, style.size_px, color)
                }
                Face::Block => {
                    let mut paint = Paint::default();
                    paint.set_color(color);
                    paint.anti_alias = false;
                    blockfont::draw(pixmap, ch, pen, baseline, style.size_px, &paint);
                }
            }
        }
        self.measure(text, style)
    }
}

/// Parses one face, logging (and swallowing) malformed data.
#[cfg_attr(all(target_arch = "wasm32", not(feature = "embed_font")), allow(dead_code))]
fn parse_face(bytes: &[u8], label: &str) -> Option<Font> {
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|err| log::warn!("[render] font {label} unreadable: {err}"))
        .ok()
}

fn draw_vector_glyph(
    pixmap: &mut Pixmap,
    font: &Font,
    ch: char,
    pen: f32,
    baseline: f32,
    size_px: f32,
    color: Color,
) {
    let (metrics, coverage) = font.rasterize(ch, size_px);
    let (Ok(width), Ok(height)) = (u32::try_from(metrics.width), u32::try_from(metrics.height))
    else {
        return;
    };
    let Some(mut glyph) = Pixmap::new(width, height) else {
        return;
    };

    let base = color.to_color_u8();
    for (dst, cov) in glyph.pixels_mut().iter_mut().zip(coverage) {
        let alpha = (u16::from(base.alpha()) * u16::from(cov) / 255) as u8;
        *dst = ColorU8::from_rgba(base.red(), base.green(), base.blue(), alpha).premultiply();
    }

    let left = (pen + metrics.xmin as f32).round() as i32;
    let top = (baseline - (metrics.height as f32 + metrics.ymin as f32)).round() as i32;
    pixmap.draw_pixmap(
        left,
        top,
        glyph.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod system {
    use fontdb::{Database, Family, Query, Stretch, Style, Weight};
    use fontdue::{Font, FontSettings};

    use super::{Face, FontWeight, Fonts};

    const FAMILIES: [Family<'static>; 5] = [
        Family::Name("Zalando Sans"),
        Family::Name("Helvetica Neue"),
        Family::Name("Inter"),
        Family::Name("DejaVu Sans"),
        Family::SansSerif,
    ];

    /// Closest installed face per weight, or `None` when the machine has no
    /// usable sans-serif at all.
    pub(super) fn load() -> Option<Fonts> {
        let mut db = Database::new();
        db.load_system_fonts();
        if db.is_empty() {
            return None;
        }

        let medium = pick(&db, FontWeight::Medium)?;
        let semibold = pick(&db, FontWeight::SemiBold).unwrap_or_else(|| medium.clone());
        log::debug!("[render] using system fonts ({} faces scanned)", db.len());

        Some(Fonts {
            medium: Face::Vector(Box::new(medium)),
            semibold: Face::Vector(Box::new(semibold)),
        })
    }

    fn pick(db: &Database, weight: FontWeight) -> Option<Font> {
        let id = db.query(&Query {
            families: &FAMILIES,
            weight: Weight(weight.numeric()),
            stretch: Stretch::Normal,
            style: Style::Normal,
        })?;
        db.with_face_data(id, |data, index| {
            let settings = FontSettings {
                collection_index: index,
                ..FontSettings::default()
            };
            Font::from_bytes(data, settings)
                .map_err(|err| log::warn!("[render] system font {weight} unreadable: {err}"))
                .ok()
        })
        .flatten()
    }
}
