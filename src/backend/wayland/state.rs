// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules, plus the finished canvas that every frame presents.
use anyhow::{Context, Result};
use log::debug;
use smithay_client_toolkit::{
    compositor::CompositorState, output::OutputState, registry::RegistryState, seat::SeatState,
    shell::{WaylandSurface, xdg::XdgShell}, shm::Shm,
};
use wayland_client::protocol::wl_shm;

use crate::draw::{Canvas, Color};

use super::surface::SurfaceState;

/// Buffers kept in the pool. The image is static, so one in flight and one
/// spare is enough.
const BUFFER_COUNT: usize = 2;

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) xdg_shell: XdgShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    // Surface and buffer management
    pub(super) surface: SurfaceState,

    // What we show
    pub(super) canvas: Canvas,
    pub(super) background: Color,

    pub(super) needs_redraw: bool,
    pub(super) should_exit: bool,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        xdg_shell: XdgShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        canvas: Canvas,
        background: Color,
    ) -> Self {
        Self {
            registry_state,
            compositor_state,
            xdg_shell,
            shm,
            output_state,
            seat_state,
            surface: SurfaceState::new(),
            canvas,
            background,
            needs_redraw: true,
            should_exit: false,
        }
    }

    /// Canvas size, used when the compositor leaves the window size to us.
    pub(super) fn canvas_size(&self) -> (u32, u32) {
        (
            self.canvas.width().max(1) as u32,
            self.canvas.height().max(1) as u32,
        )
    }

    /// Copies the canvas into a fresh shm buffer and commits it.
    pub(super) fn render(&mut self) -> Result<()> {
        debug!("=== RENDER START ===");
        let width = self.surface.width();
        let height = self.surface.height();

        // Get a buffer from the pool
        let (buffer, data) = {
            let pool = self.surface.ensure_pool(&self.shm, BUFFER_COUNT)?;
            debug!("Requesting buffer from pool");
            pool.create_buffer(
                width as i32,
                height as i32,
                (width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?
        };

        // SAFETY: This unsafe block creates a Cairo surface from raw memory buffer.
        // Safety invariants that must be maintained:
        // 1. `data` is a valid mutable slice from SlotPool with exactly (width * height * 4) bytes
        // 2. The buffer format ARgb32 matches the allocation (4 bytes per pixel: alpha, red, green, blue)
        // 3. The stride (width * 4) correctly represents the number of bytes per row
        // 4. `cairo_surface` and `ctx` are explicitly dropped before the buffer is committed to Wayland,
        //    ensuring Cairo doesn't access memory after ownership transfers
        // 5. No other references to this memory exist during Cairo's usage
        let cairo_surface = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                data.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )
            .context("Failed to create Cairo surface")?
        };

        let ctx = cairo::Context::new(&cairo_surface).context("Failed to create Cairo context")?;

        // Window area outside the canvas shows the background.
        let bg = self.background;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
        ctx.paint().context("Failed to clear background")?;

        self.canvas
            .paint_onto(&ctx)
            .context("Failed to paint canvas")?;

        debug!("Flushing Cairo surface");
        cairo_surface.flush();
        drop(ctx);
        drop(cairo_surface);

        debug!("Attaching buffer and committing surface");
        let wl_surface = self
            .surface
            .window()
            .context("Window not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(0, 0, width as i32, height as i32);
        wl_surface.commit();
        debug!("=== RENDER COMPLETE ===");

        Ok(())
    }
}
