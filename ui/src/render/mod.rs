//! Rasterization of the 9:16 share images.
//!
//! Renderers draw into a `tiny_skia::Pixmap` and hand back a [`Snapshot`];
//! encoding to PNG or a data URI happens only when an export asks for it.

pub mod background;
pub mod blockfont;
pub mod clock;
pub mod dial;
pub mod face;
pub mod fonts;
pub mod geometry;
pub mod grid;
pub mod session;
pub mod style;
pub mod text;
pub mod theme;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tiny_skia::{Color, Paint, Pixmap};

pub use clock::render_clock;
pub use face::{BundledFace, FaceSource};
pub use fonts::Fonts;
pub use grid::{render_grid, GridLayout};
pub use session::{RenderSession, RenderTicket};
pub use style::{PresetName, StylePreset};
pub use theme::{Rgb, Theme};

pub const SNAPSHOT_WIDTH: u32 = 1080;
pub const SNAPSHOT_HEIGHT: u32 = 1920;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unable to allocate a {width}x{height} canvas")]
    Allocation { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("clock face asset `{0}` is missing")]
    FaceMissing(String),
    #[error("clock face could not be parsed: {0}")]
    FaceInvalid(String),
}

/// Everything a renderer reads besides the statistics themselves.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub preset: &'a StylePreset,
    pub fonts: &'a Fonts,
}

/// A finished share image.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pixmap: Pixmap,
}

impl Snapshot {
    pub(crate) fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight (non-premultiplied) RGBA at `(x, y)`; `None` outside the
    /// canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // `Pixmap::pixel` only bounds-checks the flat index.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Straight RGBA rows, top to bottom.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder
                .write_header()?
                .write_image_data(&self.to_rgba())?;
        }
        Ok(buffer)
    }

    /// `data:image/png;base64,…` for inline previews.
    pub fn data_uri(&self) -> Result<String, RenderError> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}

pub(crate) fn new_canvas() -> Result<Pixmap, RenderError> {
    Pixmap::new(SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT).ok_or(RenderError::Allocation {
        width: SNAPSHOT_WIDTH,
        height: SNAPSHOT_HEIGHT,
    })
}

pub(crate) fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}
