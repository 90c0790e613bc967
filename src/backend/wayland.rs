// Wayland viewer: a single xdg-shell toplevel presenting the pre-rendered canvas
// through a shared-memory buffer.
mod backend;
mod handlers;
mod state;
mod surface;

pub use backend::WaylandBackend;

/// Application id announced to the compositor.
pub(crate) const APP_ID: &str = "drawpp";
