//! In-memory [`Surface`] that records every drawing call.
//!
//! Used by headless runs to summarize a scene without a display, and by tests
//! to inspect exactly which pixels a primitive plotted.

use super::color::{BLACK, Color};
use super::surface::Surface;
use crate::util::Rect;

/// A single recorded drawing call, tagged with the color it was made in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    Clear {
        color: Color,
    },
    FillRect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
    },
    Point {
        x: i32,
        y: i32,
        color: Color,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    },
}

/// Counts of each kind of drawing call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub clears: usize,
    pub rects: usize,
    pub points: usize,
    pub lines: usize,
}

/// Surface that appends each call to a list instead of rasterizing it.
#[derive(Debug)]
pub struct Recorder {
    color: Color,
    ops: Vec<DrawOp>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            color: BLACK,
            ops: Vec::new(),
        }
    }

    /// All recorded calls in the order they were made.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Coordinates of every plotted point, in plot order.
    pub fn points(&self) -> Vec<(i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Point { x, y, .. } => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    /// Box covering every rectangle, point and line drawn so far.
    pub fn bounds(&self) -> Option<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Clear { .. } => None,
                DrawOp::FillRect { x, y, w, h, .. } => {
                    let (x2, y2) = (x.saturating_add(w), y.saturating_add(h));
                    Rect::from_min_max(x.min(x2), y.min(y2), x.max(x2), y.max(y2))
                }
                DrawOp::Point { x, y, .. } => {
                    Rect::from_min_max(x, y, x.saturating_add(1), y.saturating_add(1))
                }
                DrawOp::Line { x1, y1, x2, y2, .. } => Rect::from_min_max(
                    x1.min(x2),
                    y1.min(y2),
                    x1.max(x2).saturating_add(1),
                    y1.max(y2).saturating_add(1),
                ),
            })
            .reduce(|acc, rect| acc.union(&rect))
    }

    pub fn stats(&self) -> DrawStats {
        let mut stats = DrawStats::default();
        for op in &self.ops {
            match op {
                DrawOp::Clear { .. } => stats.clears += 1,
                DrawOp::FillRect { .. } => stats.rects += 1,
                DrawOp::Point { .. } => stats.points += 1,
                DrawOp::Line { .. } => stats.lines += 1,
            }
        }
        stats
    }
}

impl Surface for Recorder {
    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_color(&self) -> Color {
        self.color
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear { color: self.color });
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            w,
            h,
            color: self.color,
        });
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.ops.push(DrawOp::Point {
            x,
            y,
            color: self.color,
        });
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color: self.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};

    #[test]
    fn records_calls_with_their_color() {
        let mut rec = Recorder::new();
        rec.set_draw_color(WHITE);
        rec.clear();
        rec.set_draw_color(RED);
        rec.draw_point(3, 4);

        assert_eq!(
            rec.ops(),
            &[
                DrawOp::Clear { color: WHITE },
                DrawOp::Point {
                    x: 3,
                    y: 4,
                    color: RED
                },
            ]
        );
        assert_eq!(rec.points(), vec![(3, 4)]);
    }

    #[test]
    fn bounds_ignore_clears() {
        let mut rec = Recorder::new();
        rec.clear();
        assert_eq!(rec.bounds(), None);

        rec.fill_rect(100, 100, 200, 200);
        rec.draw_line(100, 100, 700, 700);
        rec.draw_point(50, 120);
        assert_eq!(rec.bounds(), Rect::new(50, 100, 651, 601));

        let stats = rec.stats();
        assert_eq!((stats.clears, stats.rects, stats.lines, stats.points), (1, 1, 1, 1));
    }

    #[test]
    fn bounds_normalize_negative_extents_and_saturate() {
        let mut rec = Recorder::new();
        rec.fill_rect(300, 300, -20, -20);
        assert_eq!(rec.bounds(), Rect::new(280, 280, 20, 20));

        let mut rec = Recorder::new();
        rec.fill_rect(i32::MAX - 5, 0, 100, 10);
        assert_eq!(rec.bounds(), Rect::new(i32::MAX - 5, 0, 5, 10));
    }
}
