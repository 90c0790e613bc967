use anyhow::Result;

use crate::draw::{Canvas, Color};

pub mod wayland;

/// Opens a window showing `canvas` and blocks until the user closes it.
///
/// # Arguments
/// * `canvas` - The finished drawing
/// * `title` - Toplevel window title
/// * `background` - Fill for any window area the canvas does not cover
pub fn run_wayland(canvas: Canvas, title: String, background: Color) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(canvas, title, background);
    backend.run()
}
