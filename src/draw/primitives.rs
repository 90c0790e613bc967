//! Shape rasterization routines.
//!
//! Each routine draws with the surface's current color unless noted
//! otherwise. Circles and arcs are rasterized point by point; squares and
//! lines defer to the surface's native rectangle and line primitives.

use super::color::{BLUE, Color};
use super::surface::Surface;

/// Radius in pixels of the disk marking the cursor position.
pub const CURSOR_RADIUS: i32 = 5;

/// Fills the axis-aligned square `[x, x + size) × [y, y + size)`.
///
/// A negative `size` is handed to the surface unchanged.
pub fn draw_square<S: Surface + ?Sized>(surface: &mut S, x: i32, y: i32, size: i32) {
    surface.fill_rect(x, y, size, size);
}

/// Draws a filled disk of `radius` centred on `(cx, cy)`.
///
/// Scans the `2r × 2r` box and plots every offset whose squared distance from
/// the centre is at most `r²`. Offsets run from `r` down to `-r + 1` on each
/// axis. A radius of zero or less plots nothing. Points that would fall
/// outside the `i32` range are skipped.
pub fn draw_circle<S: Surface + ?Sized>(surface: &mut S, cx: i32, cy: i32, radius: i32) {
    let r = i64::from(radius);
    let r_sq = r * r;
    for w in 0..2 * r {
        for h in 0..2 * r {
            let dx = r - w;
            let dy = r - h;
            if dx * dx + dy * dy > r_sq {
                continue;
            }
            if let Some((x, y)) = offset(cx, cy, dx, dy) {
                surface.draw_point(x, y);
            }
        }
    }
}

/// `(cx + dx, cy + dy)`, or `None` when either coordinate leaves `i32`.
fn offset(cx: i32, cy: i32, dx: i64, dy: i64) -> Option<(i32, i32)> {
    let x = i32::try_from(i64::from(cx) + dx).ok()?;
    let y = i32::try_from(i64::from(cy) + dy).ok()?;
    Some((x, y))
}

/// Number of cells [`draw_circle`] tests for `radius`.
pub fn circle_scan_len(radius: i32) -> u64 {
    let side = 2 * i64::from(radius).max(0) as u64;
    side * side
}

/// Draws a straight line between two points.
pub fn draw_line<S: Surface + ?Sized>(surface: &mut S, x1: i32, y1: i32, x2: i32, y2: i32) {
    surface.draw_line(x1, y1, x2, y2);
}

/// Plots one point per whole degree from `start_angle` to `end_angle`
/// inclusive, on the circle of `radius` around `(cx, cy)`.
///
/// The angles are swapped when given in decreasing order. Offsets are
/// truncated toward zero. Angles grow clockwise on screen since y points
/// down.
pub fn draw_arc<S: Surface + ?Sized>(
    surface: &mut S,
    cx: i32,
    cy: i32,
    radius: i32,
    start_angle: i32,
    end_angle: i32,
) {
    let (start, end) = if start_angle > end_angle {
        (end_angle, start_angle)
    } else {
        (start_angle, end_angle)
    };

    for angle in start..=end {
        let (dx, dy) = arc_offset(radius, angle);
        if let Some((x, y)) = offset(cx, cy, dx, dy) {
            surface.draw_point(x, y);
        }
    }
}

/// Number of points [`draw_arc`] plots between two angles.
pub fn arc_len(start_angle: i32, end_angle: i32) -> u64 {
    (i64::from(start_angle) - i64::from(end_angle)).unsigned_abs() + 1
}

/// Point of the arc at `angle` degrees, truncated the way [`draw_arc`] plots it.
///
/// Coordinates clamp to the `i32` range; [`draw_arc`] skips such points.
pub fn arc_point(cx: i32, cy: i32, radius: i32, angle: i32) -> (i32, i32) {
    let (dx, dy) = arc_offset(radius, angle);
    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (clamp(i64::from(cx) + dx), clamp(i64::from(cy) + dy))
}

fn arc_offset(radius: i32, angle: i32) -> (i64, i64) {
    let rad = f64::from(angle).to_radians();
    let dx = (f64::from(radius) * rad.cos()) as i64;
    let dy = (f64::from(radius) * rad.sin()) as i64;
    (dx, dy)
}

/// Draws the cursor marker in the default marker color (blue).
pub fn draw_cursor<S: Surface + ?Sized>(surface: &mut S, x: i32, y: i32) {
    draw_cursor_with(surface, x, y, BLUE);
}

/// Draws a disk of [`CURSOR_RADIUS`] at `(x, y)` in `color`.
///
/// The surface's draw color is restored afterwards. Marker pixels past the
/// `i32` range are skipped.
pub fn draw_cursor_with<S: Surface + ?Sized>(surface: &mut S, x: i32, y: i32, color: Color) {
    let previous = surface.draw_color();
    surface.set_draw_color(color);

    let r_sq = CURSOR_RADIUS * CURSOR_RADIUS;
    for w in -CURSOR_RADIUS..CURSOR_RADIUS {
        for h in -CURSOR_RADIUS..CURSOR_RADIUS {
            if w * w + h * h > r_sq {
                continue;
            }
            if let Some((px, py)) = offset(x, y, i64::from(w), i64::from(h)) {
                surface.draw_point(px, py);
            }
        }
    }

    surface.set_draw_color(previous);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};
    use crate::draw::record::{DrawOp, Recorder};

    #[test]
    fn circle_only_plots_inside_the_disk() {
        for radius in 0..25 {
            let mut rec = Recorder::new();
            draw_circle(&mut rec, 50, 60, radius);
            for (x, y) in rec.points() {
                let (dx, dy) = (x - 50, y - 60);
                assert!(
                    dx * dx + dy * dy <= radius * radius,
                    "({x}, {y}) lies outside radius {radius}"
                );
            }
        }
    }

    #[test]
    fn circle_with_zero_or_negative_radius_plots_nothing() {
        let mut rec = Recorder::new();
        draw_circle(&mut rec, 10, 10, 0);
        draw_circle(&mut rec, 10, 10, -4);
        assert!(rec.ops().is_empty());
    }

    #[test]
    fn unit_circle_scans_offsets_from_r_down_to_one_minus_r() {
        let mut rec = Recorder::new();
        draw_circle(&mut rec, 0, 0, 1);
        assert_eq!(rec.points(), vec![(1, 0), (0, 1), (0, 0)]);
    }

    #[test]
    fn quarter_arc_plots_one_point_per_degree() {
        let mut rec = Recorder::new();
        draw_arc(&mut rec, 400, 400, 100, 0, 90);

        let points = rec.points();
        assert_eq!(points.len(), 91);
        assert_eq!(points.first(), Some(&(500, 400)));
        assert_eq!(points.last(), Some(&(400, 500)));
    }

    #[test]
    fn arc_angles_are_normalized() {
        let mut forward = Recorder::new();
        let mut backward = Recorder::new();
        draw_arc(&mut forward, 0, 0, 30, 10, 50);
        draw_arc(&mut backward, 0, 0, 30, 50, 10);
        assert_eq!(forward.points(), backward.points());
    }

    #[test]
    fn square_fills_a_single_rectangle() {
        let mut rec = Recorder::new();
        rec.set_draw_color(RED);
        draw_square(&mut rec, 100, 100, 200);
        assert_eq!(
            rec.ops(),
            &[DrawOp::FillRect {
                x: 100,
                y: 100,
                w: 200,
                h: 200,
                color: RED,
            }]
        );
    }

    #[test]
    fn negative_square_size_is_passed_through() {
        let mut rec = Recorder::new();
        rec.set_draw_color(RED);
        draw_square(&mut rec, 300, 300, -20);
        assert_eq!(
            rec.ops(),
            &[DrawOp::FillRect {
                x: 300,
                y: 300,
                w: -20,
                h: -20,
                color: RED,
            }]
        );
    }

    #[test]
    fn large_radius_does_not_overflow() {
        // r² exceeds i32 here; the scan stays in i64.
        assert_eq!(circle_scan_len(46_341), 92_682u64 * 92_682);

        // A disk centred far off the i32 range plots only its in-range half.
        let mut rec = Recorder::new();
        draw_circle(&mut rec, i32::MAX, 0, 2);
        assert!(!rec.points().is_empty());
        assert!(rec.points().iter().all(|&(x, _)| x >= i32::MAX - 1));
    }

    #[test]
    fn markers_and_arcs_at_the_i32_edge_skip_unrepresentable_points() {
        let mut rec = Recorder::new();
        draw_cursor(&mut rec, i32::MAX, 0);
        let points = rec.points();
        assert!(!points.is_empty() && points.len() < 79);

        let mut rec = Recorder::new();
        draw_arc(&mut rec, i32::MAX, 0, 10, 0, 180);
        // Angles 0..=84 truncate to a positive x offset and are dropped.
        assert_eq!(rec.points().len(), 96);
        assert_eq!(arc_point(i32::MAX, 0, 10, 0), (i32::MAX, 0));
    }

    #[test]
    fn work_estimates_match_what_is_plotted() {
        assert_eq!(arc_len(0, 90), 91);
        assert_eq!(arc_len(90, 0), 91);
        assert_eq!(arc_len(-2_000_000_000, 2_000_000_000), 4_000_000_001);
        assert_eq!(circle_scan_len(0), 0);
        assert_eq!(circle_scan_len(-5), 0);
        assert_eq!(circle_scan_len(3), 36);
    }

    #[test]
    fn cursor_marker_is_blue_and_restores_color() {
        let mut rec = Recorder::new();
        rec.set_draw_color(WHITE);
        draw_cursor(&mut rec, 20, 20);

        assert_eq!(rec.draw_color(), WHITE);
        assert_eq!(rec.points().len(), 79);
        assert!(rec.ops().iter().all(|op| matches!(
            op,
            DrawOp::Point { color, .. } if *color == BLUE
        )));
    }
}
