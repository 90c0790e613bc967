//! The drawing target abstraction and its Cairo implementation.

use super::color::Color;

/// A 2D drawing target exposing the handful of primitives the renderer needs.
///
/// Implementations keep a current draw color that every primitive uses, the
/// same way an immediate-mode renderer does. Drawing is infallible from the
/// caller's point of view.
pub trait Surface {
    /// Sets the color used by subsequent drawing calls.
    fn set_draw_color(&mut self, color: Color);

    /// Returns the color currently used for drawing.
    fn draw_color(&self) -> Color;

    /// Fills the whole surface with the current draw color.
    fn clear(&mut self);

    /// Fills the rectangle `[x, x + w) × [y, y + h)`.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Plots a single pixel.
    fn draw_point(&mut self, x: i32, y: i32);

    /// Draws a one pixel wide straight line, both endpoints included.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);
}

/// [`Surface`] backed by a Cairo context.
///
/// Antialiasing is disabled so that points and rectangles land on exact
/// pixel boundaries.
pub struct CairoSurface<'a> {
    ctx: &'a cairo::Context,
    color: Color,
}

impl<'a> CairoSurface<'a> {
    /// Wraps `ctx`, starting with `color` as the draw color.
    pub fn new(ctx: &'a cairo::Context, color: Color) -> Self {
        ctx.set_antialias(cairo::Antialias::None);
        ctx.set_operator(cairo::Operator::Over);
        let mut surface = Self { ctx, color };
        surface.set_draw_color(color);
        surface
    }
}

impl Surface for CairoSurface<'_> {
    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }

    fn draw_color(&self) -> Color {
        self.color
    }

    fn clear(&mut self) {
        let _ = self.ctx.save();
        self.ctx.set_operator(cairo::Operator::Source);
        let _ = self.ctx.paint();
        let _ = self.ctx.restore();
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ctx.rectangle(x as f64, y as f64, w as f64, h as f64);
        let _ = self.ctx.fill();
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.ctx.rectangle(x as f64, y as f64, 1.0, 1.0);
        let _ = self.ctx.fill();
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if x1 == x2 && y1 == y2 {
            self.draw_point(x1, y1);
            return;
        }

        self.ctx.set_line_width(1.0);
        self.ctx.set_line_cap(cairo::LineCap::Square);

        // Pixel centres, so a one pixel stroke covers whole pixels.
        self.ctx.move_to(x1 as f64 + 0.5, y1 as f64 + 0.5);
        self.ctx.line_to(x2 as f64 + 0.5, y2 as f64 + 0.5);
        let _ = self.ctx.stroke();
    }
}
