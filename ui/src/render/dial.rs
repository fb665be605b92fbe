//! Day/night sub-dial drawn on the lower half of the clock face.
//!
//! A sky wheel turns once per 24 clock hours beneath a fixed window over its
//! upper part, so daylight colors sit in the window around noon and the
//! night band around midnight.

use tiny_skia::{Color, FillRule, Mask, Path, PathBuilder, Pixmap, Transform};

use super::geometry::circle_path;
use super::solid;
use super::theme::Theme;

/// Sky colors by wheel angle, as (start degree, hex).
const SKY_BANDS: [(f32, u32); 6] = [
    (0.0, 0x0b1426),
    (60.0, 0x143057),
    (150.0, 0x50bdec),
    (180.0, 0x8bdcff),
    (210.0, 0x50bdec),
    (300.0, 0x143057),
];
const SEGMENTS: u32 = 120;
const WINDOW_SWEEP: f32 = 150.0;
/// Amber at 70 % opacity.
const STAR_RGBA: [u8; 4] = [255, 199, 0, 179];
/// Stars as (x, y, radius), in multiples of the dial radius, inside the
/// night band of the wheel.
const STARS: [(f32, f32, f32); 4] = [
    (0.42, -0.28, 0.030),
    (0.22, -0.42, 0.024),
    (0.12, -0.18, 0.020),
    (0.30, -0.12, 0.016),
];

/// Placement of the dial relative to the main clock face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialGeometry {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl DialGeometry {
    /// Diameter is 130/400 of the face diameter, centred 100/400 of it
    /// below the face centre.
    pub fn for_face(face_cx: f32, face_cy: f32, face_radius: f32) -> Self {
        let face_size = face_radius * 2.0;
        Self {
            cx: face_cx,
            cy: face_cy + face_size * (100.0 / 400.0),
            radius: face_size * (130.0 / 400.0) / 2.0,
        }
    }
}

/// Wheel rotation for a clock angle: noon puts the brightest band at the
/// top of the window.
///
/// The extra quarter turn is intended. Rotating by the bare angle leaves
/// noon at the left edge (canvas −x), which the upper window never shows.
pub fn wheel_rotation(day_night_angle: f32) -> f32 {
    day_night_angle + 90.0
}

fn band_color(start_deg: f32) -> u32 {
    SKY_BANDS
        .iter()
        .rev()
        .find(|(from, _)| start_deg >= *from)
        .map(|(_, hex)| *hex)
        .unwrap_or(SKY_BANDS[0].1)
}

fn hex_color(hex: u32) -> Color {
    Color::from_rgba8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
}

/// Pie slice from `start_deg` to `end_deg` (canvas angles, clockwise from
/// +x), traced through one point per segment step.
fn wedge(radius: f32, start_deg: f32, end_deg: f32) -> Option<Path> {
    let step = 360.0 / SEGMENTS as f32;
    let steps = ((end_deg - start_deg) / step).ceil().max(1.0) as u32;
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    for i in 0..=steps {
        let deg = (start_deg + i as f32 * step).min(end_deg).to_radians();
        pb.line_to(radius * deg.cos(), radius * deg.sin());
    }
    pb.close();
    pb.finish()
}

/// Circle minus the segment below the chord joining the two window ends.
fn window_path(radius: f32) -> Option<Path> {
    let inset = (180.0 - WINDOW_SWEEP) / 2.0;
    let start = 180.0 - inset;
    let end = 360.0 + inset;
    let step = 360.0 / SEGMENTS as f32;
    let steps = ((end - start) / step).ceil() as u32;
    let mut pb = PathBuilder::new();
    for i in 0..=steps {
        let deg = (start + i as f32 * step).min(end).to_radians();
        let (x, y) = (radius * deg.cos(), radius * deg.sin());
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.close();
    pb.finish()
}

pub fn draw_day_night_dial(
    pixmap: &mut Pixmap,
    theme: &Theme,
    dial: DialGeometry,
    day_night_angle: f32,
) {
    let origin = Transform::from_translate(dial.cx, dial.cy);
    let Some(mut mask) = Mask::new(pixmap.width(), pixmap.height()) else {
        return;
    };
    if let Some(window) = window_path(dial.radius) {
        mask.fill_path(&window, FillRule::Winding, true, origin);
    }

    let wheel = origin.pre_rotate(wheel_rotation(day_night_angle));
    for (index, (band_start, _)) in SKY_BANDS.iter().enumerate() {
        let band_end = SKY_BANDS.get(index + 1).map_or(360.0, |(next, _)| *next);
        // rim smoothing comes from the window mask
        let mut paint = solid(hex_color(band_color(*band_start)));
        paint.anti_alias = false;
        if let Some(path) = wedge(dial.radius, *band_start, band_end) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, wheel, Some(&mask));
        }
    }

    let [r, g, b, a] = STAR_RGBA;
    let star_paint = solid(Color::from_rgba8(r, g, b, a));
    for (x, y, size) in STARS {
        if let Some(star) = circle_path(x * dial.radius, y * dial.radius, size * dial.radius) {
            pixmap.fill_path(&star, &star_paint, FillRule::Winding, wheel, Some(&mask));
        }
    }

    // sun in the middle of the day band, moon opposite it
    let body_r = dial.radius * 0.14;
    let reach = dial.radius * 0.6;
    for (x, color) in [(-reach, theme.accent_2.opaque()), (reach, theme.white.with_alpha(0.9))] {
        if let Some(body) = circle_path(x, 0.0, body_r) {
            pixmap.fill_path(&body, &solid(color), FillRule::Winding, wheel, Some(&mask));
        }
    }

    if let Some(hub) = circle_path(dial.cx, dial.cy, dial.radius * 0.16) {
        let paint = solid(theme.white.opaque());
        pixmap.fill_path(&hub, &paint, FillRule::Winding, Transform::identity(), None);
    }
}
