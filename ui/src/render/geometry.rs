//! Path builders shared by both renderers.

use tiny_skia::{Path, PathBuilder, Point, Rect, Transform};

/// Corner radius actually used for a `w`×`h` box: never more than half the
/// shorter side, never negative.
pub fn clamp_corner_radius(w: f32, h: f32, r: f32) -> f32 {
    r.min(w / 2.0).min(h / 2.0).max(0.0)
}

/// Closed rounded rectangle with quadratic corners.
///
/// Returns `None` for degenerate boxes (zero or negative extent).
pub fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<Path> {
    if !(w > 0.0 && h > 0.0) {
        return None;
    }
    let radius = clamp_corner_radius(w, h, r);
    let mut pb = PathBuilder::new();
    pb.move_to(x + radius, y);
    pb.line_to(x + w - radius, y);
    pb.quad_to(x + w, y, x + w, y + radius);
    pb.line_to(x + w, y + h - radius);
    pb.quad_to(x + w, y + h, x + w - radius, y + h);
    pb.line_to(x + radius, y + h);
    pb.quad_to(x, y + h, x, y + h - radius);
    pb.line_to(x, y + radius);
    pb.quad_to(x, y, x + radius, y);
    pb.close();
    pb.finish()
}

pub fn circle_path(cx: f32, cy: f32, r: f32) -> Option<Path> {
    PathBuilder::from_circle(cx, cy, r)
}

/// Outline of a clock hand in its own frame: the pivot end sits on y=0 and
/// the tip points to negative y, spanning x in `0..width`.
#[derive(Clone, Debug, PartialEq)]
pub struct HandShape {
    pub length: f32,
    pub width: f32,
    /// Six-point blade: tip edge, shoulders, base.
    pub blade: [Point; 6],
    /// Accent stripe near the tip, as (x, y, w, h).
    pub stripe: Option<(f32, f32, f32, f32)>,
}

impl HandShape {
    pub fn new(length: f32, width: f32) -> Self {
        let head_inset = (width * 0.8).round().max(10.0);
        let tip_width = (width * 0.22).round().max(4.0);
        let shoulder = (width * 0.9).round().max(6.0);
        let shoulder_inset = width - shoulder;
        let top = -length;

        let blade = [
            Point::from_xy((width - tip_width) / 2.0, top),
            Point::from_xy((width + tip_width) / 2.0, top),
            Point::from_xy(shoulder, top + head_inset),
            Point::from_xy(shoulder, 0.0),
            Point::from_xy(shoulder_inset, 0.0),
            Point::from_xy(shoulder_inset, top + head_inset),
        ];

        let inset = (width * 0.34).round().max(2.0);
        // Never starts above the tip.
        let stripe_start = (length - 6.0).min(width.round().max(8.0)).max(0.0);
        let stripe_end = (length - 2.0).min((width * 3.0).round().max(24.0));
        let stripe_w = width - 2.0 * inset;
        let stripe_h = stripe_end - stripe_start;
        let stripe = (stripe_w > 0.0 && stripe_h > 0.0)
            .then_some((inset, top + stripe_start, stripe_w, stripe_h));

        Self {
            length,
            width,
            blade,
            stripe,
        }
    }

    /// Maps the hand frame onto the canvas: centred on the pivot at
    /// (`cx`, `cy`) and turned `angle_deg` clockwise from 12 o'clock.
    pub fn placement(&self, cx: f32, cy: f32, angle_deg: f32) -> Transform {
        Transform::from_translate(cx, cy)
            .pre_rotate(angle_deg)
            .pre_translate(-self.width / 2.0, 0.0)
    }

    pub fn blade_path(&self) -> Option<Path> {
        let mut pb = PathBuilder::new();
        let [first, rest @ ..] = &self.blade;
        pb.move_to(first.x, first.y);
        for point in rest {
            pb.line_to(point.x, point.y);
        }
        pb.close();
        pb.finish()
    }

    pub fn stripe_path(&self) -> Option<Path> {
        let (x, y, w, h) = self.stripe?;
        Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_never_exceeds_half_the_short_side() {
        for (w, h) in [(100.0, 40.0), (40.0, 100.0), (10.0, 10.0), (300.0, 2.0)] {
            for r in [0.0, 1.0, 5.0, 20.0, 50.0, 1000.0] {
                let radius = clamp_corner_radius(w, h, r);
                assert!(radius <= w.min(h) / 2.0);
                assert!(radius <= r);
            }
        }
        assert_eq!(clamp_corner_radius(10.0, 10.0, -3.0), 0.0);
    }

    #[test]
    fn oversized_radius_stays_inside_the_box() {
        let path = rounded_rect_path(10.0, 20.0, 80.0, 30.0, 500.0).expect("path");
        let bounds = path.bounds();
        assert!((bounds.left() - 10.0).abs() < 1e-3);
        assert!((bounds.top() - 20.0).abs() < 1e-3);
        assert!((bounds.right() - 90.0).abs() < 1e-3);
        assert!((bounds.bottom() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_boxes_have_no_path() {
        assert!(rounded_rect_path(0.0, 0.0, 0.0, 10.0, 4.0).is_none());
        assert!(rounded_rect_path(0.0, 0.0, 10.0, -1.0, 4.0).is_none());
    }

    #[test]
    fn hand_blade_geometry() {
        let hand = HandShape::new(210.0, 24.0);
        // tip 5px wide centred on the hand axis
        assert_eq!(hand.blade[0], Point::from_xy(9.5, -210.0));
        assert_eq!(hand.blade[1], Point::from_xy(14.5, -210.0));
        // shoulders at 22px, inset 2px, head 19px below the tip
        assert_eq!(hand.blade[2], Point::from_xy(22.0, -191.0));
        assert_eq!(hand.blade[4], Point::from_xy(2.0, 0.0));
        assert_eq!(hand.stripe, Some((8.0, -186.0, 8.0, 48.0)));
    }

    #[test]
    fn short_hands_keep_the_stripe_inside_the_blade() {
        let hand = HandShape::new(6.0, 24.0);
        assert_eq!(hand.stripe, Some((8.0, -6.0, 8.0, 4.0)));

        let stub = HandShape::new(4.0, 24.0);
        assert_eq!(stub.stripe, Some((8.0, -4.0, 8.0, 2.0)));

        let nub = HandShape::new(2.0, 24.0);
        assert!(nub.stripe.is_none());
        assert!(nub.blade_path().is_some());
    }

    #[test]
    fn placement_rotates_tip_clockwise() {
        let hand = HandShape::new(100.0, 20.0);
        let ts = hand.placement(500.0, 500.0, 90.0);
        // hand-frame tip centre (10, -100) lands 100px right of the pivot
        let mut tip = [Point::from_xy(10.0, -100.0)];
        ts.map_points(&mut tip);
        assert!((tip[0].x - 600.0).abs() < 1e-3);
        assert!((tip[0].y - 500.0).abs() < 1e-3);
    }
}
