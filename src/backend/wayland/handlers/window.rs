// Responds to xdg toplevel configure/close events, keeping dimensions in sync with the compositor.
use log::info;
use smithay_client_toolkit::shell::xdg::window::{Window, WindowConfigure, WindowHandler};
use wayland_client::{Connection, QueueHandle};

use super::super::state::WaylandState;

impl WindowHandler for WaylandState {
    fn request_close(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _window: &Window) {
        info!("Window closed by user");
        self.should_exit = true;
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _window: &Window,
        configure: WindowConfigure,
        _serial: u32,
    ) {
        let fallback = self.canvas_size();
        if self.surface.apply_configure(configure.new_size, fallback) {
            info!(
                "Window configured: {}x{}",
                self.surface.width(),
                self.surface.height()
            );
        }

        // Every configure needs a buffer attached in response.
        self.needs_redraw = true;
    }
}
