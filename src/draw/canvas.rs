//! Offscreen canvas the scene is rendered into before presentation.

use super::color::Color;
use super::surface::{CairoSurface, Surface};

/// An ARGB32 Cairo image holding the finished drawing.
///
/// Scenes draw into the canvas once; the window backend copies it into each
/// buffer it presents.
pub struct Canvas {
    surface: cairo::ImageSurface,
    width: i32,
    height: i32,
}

impl Canvas {
    /// Creates a canvas of the given size filled with `background`.
    pub fn new(width: i32, height: i32, background: Color) -> Result<Self, cairo::Error> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        let mut canvas = Self {
            surface,
            width,
            height,
        };
        canvas.draw(background, |surface| surface.clear())?;
        Ok(canvas)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Runs `f` against a [`CairoSurface`] over this canvas, starting with
    /// `color` as the draw color.
    ///
    /// The Cairo context is dropped and the image flushed before returning.
    pub fn draw<R>(
        &mut self,
        color: Color,
        f: impl FnOnce(&mut CairoSurface<'_>) -> R,
    ) -> Result<R, cairo::Error> {
        let ctx = cairo::Context::new(&self.surface)?;
        let result = {
            let mut surface = CairoSurface::new(&ctx, color);
            f(&mut surface)
        };
        drop(ctx);
        self.surface.flush();
        Ok(result)
    }

    /// Copies the canvas onto `ctx` at the origin. Pixels of `ctx` outside
    /// the canvas are left alone.
    pub fn paint_onto(&self, ctx: &cairo::Context) -> Result<(), cairo::Error> {
        ctx.save()?;
        ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.rectangle(0.0, 0.0, self.width as f64, self.height as f64);
        ctx.fill()?;
        ctx.restore()
    }

    /// Reads the pixel at `(x, y)` as `[r, g, b, a]`.
    ///
    /// Returns `None` outside the canvas or while the image is borrowed
    /// elsewhere.
    pub fn pixel(&mut self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;

        // ARGB32 is a native-endian u32 with alpha in the high byte.
        let argb = u32::from_ne_bytes(bytes);
        Some([
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};
    use crate::draw::primitives;

    #[test]
    fn new_canvas_is_filled_with_background() {
        let mut canvas = Canvas::new(16, 16, WHITE).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(15, 15), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(16, 0), None);
    }

    #[test]
    fn square_fills_exactly_its_half_open_range() {
        let mut canvas = Canvas::new(400, 400, WHITE).unwrap();
        canvas
            .draw(RED, |s| primitives::draw_square(s, 100, 100, 200))
            .unwrap();

        let red = Some([255, 0, 0, 255]);
        let white = Some([255, 255, 255, 255]);
        assert_eq!(canvas.pixel(100, 100), red);
        assert_eq!(canvas.pixel(299, 299), red);
        assert_eq!(canvas.pixel(99, 100), white);
        assert_eq!(canvas.pixel(100, 99), white);
        assert_eq!(canvas.pixel(300, 150), white);
        assert_eq!(canvas.pixel(150, 300), white);
    }

    #[test]
    fn lines_cover_both_endpoints() {
        let mut canvas = Canvas::new(50, 50, WHITE).unwrap();
        canvas
            .draw(BLACK, |s| primitives::draw_line(s, 5, 10, 40, 10))
            .unwrap();

        let black = Some([0, 0, 0, 255]);
        assert_eq!(canvas.pixel(5, 10), black);
        assert_eq!(canvas.pixel(22, 10), black);
        assert_eq!(canvas.pixel(40, 10), black);
        assert_eq!(canvas.pixel(22, 12), Some([255, 255, 255, 255]));
    }

    #[test]
    fn paint_onto_copies_only_the_canvas_area() {
        let source = Canvas::new(10, 10, RED).unwrap();
        let mut target = Canvas::new(20, 20, WHITE).unwrap();

        let ctx = cairo::Context::new(&target.surface).unwrap();
        source.paint_onto(&ctx).unwrap();
        drop(ctx);
        target.surface.flush();

        assert_eq!(target.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(target.pixel(9, 9), Some([255, 0, 0, 255]));
        assert_eq!(target.pixel(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(target.pixel(19, 0), Some([255, 255, 255, 255]));
    }
}
