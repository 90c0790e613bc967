// Coordinates backend startup/shutdown and drives the event loop while delegating
// presentation & protocol state to `WaylandState` and its handler modules.
use anyhow::{Context, Result};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        xdg::{XdgShell, window::WindowDecorations},
    },
    shm::Shm,
};
use wayland_client::{Connection, globals::registry_queue_init};

use super::APP_ID;
use super::state::WaylandState;
use crate::draw::{Canvas, Color};

/// Consecutive failed presents tolerated before giving up.
const MAX_RENDER_FAILURES: u32 = 10;

/// Wayland backend state
pub struct WaylandBackend {
    canvas: Option<Canvas>,
    title: String,
    background: Color,
}

impl WaylandBackend {
    pub fn new(canvas: Canvas, title: String, background: Color) -> Self {
        Self {
            canvas: Some(canvas),
            title,
            background,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting Wayland backend");

        let canvas = self
            .canvas
            .take()
            .context("Wayland backend can only run once")?;

        // Connect to Wayland compositor
        let conn =
            Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
        debug!("Connected to Wayland display");

        // Initialize registry and event queue
        let (globals, mut event_queue) =
            registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
        let qh = event_queue.handle();

        // Bind global interfaces
        let compositor_state =
            CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
        debug!("Bound compositor");

        let xdg_shell = XdgShell::bind(&globals, &qh).context("xdg_wm_base not available")?;
        debug!("Bound xdg shell");

        let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
        debug!("Bound shared memory");

        let output_state = OutputState::new(&globals, &qh);
        debug!("Initialized output state");

        let seat_state = SeatState::new(&globals, &qh);
        debug!("Initialized seat state");

        let registry_state = RegistryState::new(&globals);

        let mut state = WaylandState::new(
            registry_state,
            compositor_state,
            xdg_shell,
            shm,
            output_state,
            seat_state,
            canvas,
            self.background,
        );

        // Create the toplevel, pinned to the canvas size
        info!("Creating window '{}'", self.title);
        let (width, height) = state.canvas_size();
        let wl_surface = state.compositor_state.create_surface(&qh);
        let window =
            state
                .xdg_shell
                .create_window(wl_surface, WindowDecorations::RequestServer, &qh);
        window.set_title(self.title.clone());
        window.set_app_id(APP_ID);
        window.set_min_size(Some((width, height)));
        window.set_max_size(Some((width, height)));

        // Initial commit without a buffer; the compositor answers with a configure
        window.commit();

        state.surface.set_window(window);
        info!("Window created ({}x{})", width, height);

        let mut consecutive_render_failures = 0u32;

        // Main event loop
        let mut loop_error: Option<anyhow::Error> = None;
        loop {
            if state.should_exit {
                info!("Exit requested, breaking event loop");
                break;
            }

            match event_queue.blocking_dispatch(&mut state) {
                Ok(_) => {
                    if state.should_exit {
                        info!("Exit requested after dispatch, breaking event loop");
                        break;
                    }
                }
                Err(e) => {
                    warn!("Event queue error: {}", e);
                    loop_error = Some(anyhow::anyhow!("Wayland event queue error: {}", e));
                    break;
                }
            }

            if state.surface.is_configured() && state.needs_redraw {
                debug!("Main loop: needs_redraw=true, presenting canvas");
                match state.render() {
                    Ok(()) => {
                        consecutive_render_failures = 0;
                        state.needs_redraw = false;
                    }
                    Err(e) => {
                        consecutive_render_failures += 1;
                        warn!(
                            "Rendering error (attempt {}/{}): {}",
                            consecutive_render_failures, MAX_RENDER_FAILURES, e
                        );

                        if consecutive_render_failures >= MAX_RENDER_FAILURES {
                            return Err(anyhow::anyhow!(
                                "Too many consecutive render failures ({}), exiting: {}",
                                consecutive_render_failures,
                                e
                            ));
                        }

                        // Clear redraw flag to avoid infinite error loop
                        state.needs_redraw = false;
                    }
                }
            }
        }

        info!("Wayland backend exiting");

        match loop_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
