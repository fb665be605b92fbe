//! Letter-spaced single-line text layout.
//!
//! Layout only needs glyph advances, so it is written against
//! [`GlyphMeasure`] and can be exercised without loading a font.

/// Horizontal advance of a glyph at a pixel size.
pub trait GlyphMeasure {
    fn advance(&self, ch: char, size_px: f32) -> f32;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Width of `text` when every glyph is followed by `spacing_em · size_px`
/// of tracking, except the last one.
pub fn measure_letter_spaced<M: GlyphMeasure + ?Sized>(
    measure: &M,
    text: &str,
    spacing_em: f32,
    size_px: f32,
) -> f32 {
    let mut count = 0usize;
    let advances: f32 = text
        .chars()
        .inspect(|_| count += 1)
        .map(|ch| measure.advance(ch, size_px))
        .sum();
    let tracking = spacing_em * size_px;
    advances + count.saturating_sub(1) as f32 * tracking
}

/// Pen positions for each glyph of `text`, anchored at `x` according to
/// `align`. Tracking is the same for every alignment; only the starting
/// pen position moves.
pub fn layout_letter_spaced<M: GlyphMeasure + ?Sized>(
    measure: &M,
    text: &str,
    x: f32,
    spacing_em: f32,
    size_px: f32,
    align: Align,
) -> Vec<(char, f32)> {
    let total = measure_letter_spaced(measure, text, spacing_em, size_px);
    let mut pen = match align {
        Align::Left => x,
        Align::Center => x - total / 2.0,
        Align::Right => x - total,
    };
    let tracking = spacing_em * size_px;
    text.chars()
        .map(|ch| {
            let at = pen;
            pen += measure.advance(ch, size_px) + tracking;
            (ch, at)
        })
        .collect()
}
