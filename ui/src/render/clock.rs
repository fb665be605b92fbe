//! The "life in hours" poster.

use tiny_skia::{FillRule, Pixmap, Stroke, Transform};

use super::background::paint_layered_radial_background;
use super::dial::{draw_day_night_dial, DialGeometry};
use super::face::draw_face;
use super::fonts::{FontWeight, TextStyle};
use super::geometry::{circle_path, rounded_rect_path, HandShape};
use super::text::Align;
use super::{new_canvas, solid, RenderContext, RenderError, Snapshot};
use crate::core::{ClockState, Heading};

/// Shown when a clock somehow carries an empty readout.
const EMPTY_READOUT: &str = "--:--";

/// Box behind the readout text, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PillBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Baseline of the readout: one line below the last heading line, plus the
/// preset's extra gap.
pub fn readout_baseline(ctx: &RenderContext<'_>, heading: &Heading) -> f32 {
    let style = &ctx.preset.clock;
    let lines = heading.lines().count().max(1) as f32;
    style.heading_baseline + style.heading_line_height * lines + style.readout_gap
}

/// Pill around the readout measured with real ink bounds when the face
/// reports them, else 0.8 / 0.2 of the font size.
pub fn readout_pill(ctx: &RenderContext<'_>, readout: &str, centre_x: f32, baseline: f32) -> PillBox {
    let style = &ctx.preset.clock;
    let size = style.readout_font_px;
    let text_style = TextStyle::new(FontWeight::Medium, size);
    let width = ctx.fonts.measure(readout, text_style);
    let (ascent, descent) = ctx
        .fonts
        .ink_extent(FontWeight::Medium, readout, size)
        .unwrap_or((size * 0.8, size * 0.2));
    let pad = style.pill_padding;
    PillBox {
        x: centre_x - width / 2.0 - pad.x,
        y: baseline - ascent - pad.top,
        w: width + pad.x * 2.0,
        h: ascent + descent + pad.top + pad.bottom,
    }
}

/// Draws the clock poster. `face` is the parsed face artwork, when it loaded.
pub fn render_clock(
    ctx: &RenderContext<'_>,
    clock: &ClockState,
    heading: &Heading,
    face: Option<&usvg::Tree>,
) -> Result<Snapshot, RenderError> {
    let style = &ctx.preset.clock;
    let theme = ctx.theme;
    let mut pixmap = new_canvas()?;
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let centre_x = width / 2.0;

    paint_layered_radial_background(&mut pixmap, theme, style.background_strength);

    let heading_style = TextStyle::new(FontWeight::SemiBold, style.heading_font_px)
        .spacing(style.heading_letter_spacing_em)
        .align(Align::Center);
    for (index, line) in heading.lines().enumerate() {
        let baseline = style.heading_baseline + style.heading_line_height * index as f32;
        ctx.fonts.draw_text(
            &mut pixmap,
            line.trim(),
            centre_x,
            baseline,
            heading_style,
            theme.text.opaque(),
        );
    }

    let readout = if clock.readout.is_empty() {
        EMPTY_READOUT
    } else {
        clock.readout.as_str()
    };
    let baseline = readout_baseline(ctx, heading);
    let pill = readout_pill(ctx, readout, centre_x, baseline);
    if let Some(path) = rounded_rect_path(pill.x, pill.y, pill.w, pill.h, style.pill_radius) {
        pixmap.fill_path(
            &path,
            &solid(theme.text.opaque()),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    ctx.fonts.draw_text(
        &mut pixmap,
        readout,
        centre_x,
        baseline,
        TextStyle::new(FontWeight::Medium, style.readout_font_px).align(Align::Center),
        theme.white.opaque(),
    );

    let face_cy = height / 2.0 + style.face_offset_y;
    let radius = style.face_radius;
    if let Some(disc) = circle_path(centre_x, face_cy, radius) {
        pixmap.fill_path(
            &disc,
            &solid(theme.white.opaque()),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    if let Some(tree) = face {
        draw_face(&mut pixmap, tree, centre_x, face_cy, radius);
    }

    if style.day_night_dial {
        let dial = DialGeometry::for_face(centre_x, face_cy, radius);
        draw_day_night_dial(&mut pixmap, theme, dial, clock.day_night_angle());
    }

    for (ratio, angle) in [
        (style.hour_hand_ratio, clock.hour_angle),
        (style.minute_hand_ratio, clock.minute_angle),
    ] {
        draw_hand(ctx, &mut pixmap, centre_x, face_cy, radius * ratio, angle);
    }

    if let Some(pivot) = circle_path(centre_x, face_cy, style.pivot_radius) {
        pixmap.fill_path(
            &pivot,
            &solid(theme.white.opaque()),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        let stroke = Stroke {
            width: style.pivot_stroke,
            ..Stroke::default()
        };
        pixmap.stroke_path(
            &pivot,
            &solid(theme.text.opaque()),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    ctx.fonts.draw_text(
        &mut pixmap,
        &ctx.preset.signature,
        centre_x,
        height - style.signature_bottom,
        TextStyle::new(FontWeight::Medium, style.signature_font_px).align(Align::Center),
        theme.text.opaque(),
    );

    log::debug!("[render] clock snapshot drawn for {}", clock.readout);
    Ok(Snapshot::from_pixmap(pixmap))
}

fn draw_hand(
    ctx: &RenderContext<'_>,
    pixmap: &mut Pixmap,
    cx: f32,
    cy: f32,
    length: f32,
    angle: f32,
) {
    let style = &ctx.preset.clock;
    let hand = HandShape::new(length, style.hand_width);
    let placement = hand.placement(cx, cy, angle);
    if let Some(blade) = hand.blade_path() {
        pixmap.fill_path(
            &blade,
            &solid(ctx.theme.text.opaque()),
            FillRule::Winding,
            placement,
            None,
        );
    }
    if !style.hand_stripe {
        return;
    }
    if let Some(stripe) = hand.stripe_path() {
        pixmap.fill_path(
            &stripe,
            &solid(ctx.theme.accent_4.opaque()),
            FillRule::Winding,
            placement,
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fonts::Fonts;
    use crate::render::style::StylePreset;
    use crate::render::theme::Theme;

    fn fixtures() -> (Theme, StylePreset, Fonts) {
        (Theme::default(), StylePreset::story(), Fonts::block())
    }

    #[test]
    fn readout_sits_below_the_last_heading_line() {
        let (theme, preset, fonts) = fixtures();
        let ctx = RenderContext {
            theme: &theme,
            preset: &preset,
            fonts: &fonts,
        };
        let two = Heading::two_lines("My life", "in hours");
        let one = Heading::single("My life in hours");
        assert_eq!(readout_baseline(&ctx, &two), 320.0 + 400.0 + 10.0);
        assert_eq!(readout_baseline(&ctx, &one), 320.0 + 200.0 + 10.0);
    }

    #[test]
    fn pill_uses_fallback_extent_for_block_glyphs() {
        let (theme, preset, fonts) = fixtures();
        let ctx = RenderContext {
            theme: &theme,
            preset: &preset,
            fonts: &fonts,
        };
        let pill = readout_pill(&ctx, "13:30", 540.0, 730.0);
        // ascent 112 + top padding 10
        assert_eq!(pill.y, 730.0 - 112.0 - 10.0);
        // 112 + 28 + 10 + 50
        assert_eq!(pill.h, 200.0);
        // five 84px advances, no horizontal padding
        assert_eq!(pill.w, 420.0);
        assert_eq!(pill.x, 540.0 - 210.0);
    }

    #[test]
    fn renders_a_full_size_opaque_poster() {
        let (theme, preset, fonts) = fixtures();
        let ctx = RenderContext {
            theme: &theme,
            preset: &preset,
            fonts: &fonts,
        };
        let clock = ClockState::from_parts(0, 13, 30);
        let snapshot =
            render_clock(&ctx, &clock, &Heading::two_lines("My life", "in hours"), None)
                .expect("render");
        assert_eq!((snapshot.width(), snapshot.height()), (1080, 1920));
        // pivot fill at the face centre
        assert_eq!(snapshot.pixel(540, 1300), Some([255, 255, 255, 255]));
        // the minute hand points straight down at half past
        let text = theme.text;
        assert_eq!(snapshot.pixel(540, 1300 + 200), Some([text.r, text.g, text.b, 255]));
        assert!(snapshot.to_rgba().chunks(4).all(|px| px[3] == 255));
    }
}
