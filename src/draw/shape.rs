//! Shape descriptors that let a scene be written down as data.

use super::primitives;
use super::surface::Surface;

/// A drawable primitive together with its parameters.
///
/// Shapes drawn with [`Shape::render`] use the surface's current color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Filled axis-aligned square
    Square {
        /// Top-left X coordinate
        x: i32,
        /// Top-left Y coordinate
        y: i32,
        /// Side length in pixels
        size: i32,
    },
    /// Filled disk
    Circle {
        /// Center X coordinate
        cx: i32,
        /// Center Y coordinate
        cy: i32,
        radius: i32,
    },
    /// Straight line between two points
    Line { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Dotted arc, one point per degree
    Arc {
        cx: i32,
        cy: i32,
        radius: i32,
        /// Start angle in degrees
        start: i32,
        /// End angle in degrees
        end: i32,
    },
}

impl Shape {
    /// Rasterizes the shape onto `surface`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        match *self {
            Shape::Square { x, y, size } => primitives::draw_square(surface, x, y, size),
            Shape::Circle { cx, cy, radius } => primitives::draw_circle(surface, cx, cy, radius),
            Shape::Line { x1, y1, x2, y2 } => primitives::draw_line(surface, x1, y1, x2, y2),
            Shape::Arc {
                cx,
                cy,
                radius,
                start,
                end,
            } => primitives::draw_arc(surface, cx, cy, radius, start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::record::{DrawOp, Recorder};

    #[test]
    fn square_renders_as_one_fill() {
        let mut rec = Recorder::new();
        rec.set_draw_color(RED);
        Shape::Square {
            x: 100,
            y: 100,
            size: 200,
        }
        .render(&mut rec);
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
    fn arc_shape_matches_the_primitive() {
        let mut from_shape = Recorder::new();
        Shape::Arc {
            cx: 400,
            cy: 400,
            radius: 100,
            start: 0,
            end: 90,
        }
        .render(&mut from_shape);

        let mut direct = Recorder::new();
        primitives::draw_arc(&mut direct, 400, 400, 100, 0, 90);
        assert_eq!(from_shape.ops(), direct.ops());
    }
}
