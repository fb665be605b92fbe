//! Soft layered backdrop shared by the clock and (optionally) grid snapshots.

use tiny_skia::{Color, GradientStop, Paint, Pixmap, Point, RadialGradient, Rect, Shader, SpreadMode, Transform};

use super::theme::{Rgb, Theme};

/// One radial wash: centre as a fraction of the canvas, then color stops.
struct Wash {
    centre: (f32, f32),
    radius_ratio: f32,
    stops: Vec<(f32, Rgb, f32)>,
}

fn corner_washes(theme: &Theme) -> [Wash; 4] {
    [
        Wash {
            centre: (0.15, 0.10),
            radius_ratio: 0.9,
            stops: vec![(0.0, theme.bg_a1, 1.0), (0.30, theme.bg_a2, 1.0), (0.62, theme.bg_a2, 0.0)],
        },
        Wash {
            centre: (0.85, 0.15),
            radius_ratio: 0.9,
            stops: vec![(0.0, theme.bg_b1, 1.0), (0.32, theme.bg_b2, 1.0), (0.64, theme.bg_b2, 0.0)],
        },
        Wash {
            centre: (0.20, 0.85),
            radius_ratio: 0.9,
            stops: vec![(0.0, theme.bg_c1, 1.0), (0.34, theme.bg_c2, 1.0), (0.66, theme.bg_c2, 0.0)],
        },
        Wash {
            centre: (0.80, 0.80),
            radius_ratio: 0.9,
            stops: vec![
                (0.0, theme.bg_d1, 1.0),
                (0.36, theme.bg_d2, 1.0),
                (0.72, theme.bg_d3, 1.0),
                (1.0, theme.bg_d3, 0.0),
            ],
        },
    ]
}

fn accent_glows(theme: &Theme) -> [Wash; 2] {
    [
        Wash {
            centre: (0.10, 0.10),
            radius_ratio: 0.75,
            stops: vec![(0.0, theme.accent, 0.35), (0.6, theme.accent, 0.0)],
        },
        Wash {
            centre: (0.90, 0.90),
            radius_ratio: 0.75,
            stops: vec![(0.0, theme.accent_2, 0.35), (0.6, theme.accent_2, 0.0)],
        },
    ]
}

pub fn paint_plain(pixmap: &mut Pixmap, color: Color) {
    pixmap.fill(color);
}

/// White base, four corner washes scaled by `strength`, then two accent
/// glows at full strength.
pub fn paint_layered_radial_background(pixmap: &mut Pixmap, theme: &Theme, strength: f32) {
    let strength = strength.clamp(0.0, 1.0);
    pixmap.fill(theme.white.opaque());

    let (w, h) = (pixmap.width() as f32, pixmap.height() as f32);
    let Some(canvas) = Rect::from_xywh(0.0, 0.0, w, h) else {
        return;
    };

    if strength > 0.0 {
        for wash in corner_washes(theme) {
            fill_wash(pixmap, canvas, &wash, strength);
        }
    }
    for glow in accent_glows(theme) {
        fill_wash(pixmap, canvas, &glow, 1.0);
    }
}

fn fill_wash(pixmap: &mut Pixmap, canvas: Rect, wash: &Wash, strength: f32) {
    let Some(shader) = wash_shader(canvas, wash, strength) else {
        log::debug!("[render] skipped degenerate gradient at {:?}", wash.centre);
        return;
    };
    let paint = Paint {
        shader,
        anti_alias: false,
        ..Paint::default()
    };
    pixmap.fill_rect(canvas, &paint, Transform::identity(), None);
}

fn wash_shader(canvas: Rect, wash: &Wash, strength: f32) -> Option<Shader<'static>> {
    let (w, h) = (canvas.width(), canvas.height());
    let centre = Point::from_xy(wash.centre.0 * w, wash.centre.1 * h);
    let radius = wash.radius_ratio * w.max(h);
    let stops = wash
        .stops
        .iter()
        .map(|(offset, color, alpha)| GradientStop::new(*offset, color.with_alpha(alpha * strength)))
        .collect();
    RadialGradient::new(centre, centre, radius, stops, SpreadMode::Pad, Transform::identity())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(strength: f32) -> Pixmap {
        let mut pixmap = Pixmap::new(108, 192).expect("pixmap");
        paint_layered_radial_background(&mut pixmap, &Theme::default(), strength);
        pixmap
    }

    #[test]
    fn background_is_fully_opaque() {
        let pixmap = render(0.5);
        assert!(pixmap.pixels().iter().all(|px| px.alpha() == 255));
    }

    #[test]
    fn strength_is_clamped() {
        assert_eq!(render(3.0).data(), render(1.0).data());
        assert_eq!(render(-1.0).data(), render(0.0).data());
    }

    #[test]
    fn zero_strength_leaves_only_the_glows() {
        let pixmap = render(0.0);
        // the centre is outside both glows (0.6 × 0.75 × 192 ≈ 86px reach)
        let centre = pixmap.pixel(54, 96).expect("in bounds");
        assert_eq!((centre.red(), centre.green(), centre.blue()), (255, 255, 255));
        // near the top-left glow the accent tints the base
        let corner = pixmap.pixel(11, 19).expect("in bounds");
        assert_ne!((corner.red(), corner.green(), corner.blue()), (255, 255, 255));
    }

    #[test]
    fn stronger_washes_darken_the_middle() {
        let luma = |px: tiny_skia::PremultipliedColorU8| {
            u32::from(px.red()) + u32::from(px.green()) + u32::from(px.blue())
        };
        let faint = render(0.2).pixel(54, 96).expect("in bounds");
        let strong = render(1.0).pixel(54, 96).expect("in bounds");
        assert!(luma(strong) < luma(faint));
    }
}
