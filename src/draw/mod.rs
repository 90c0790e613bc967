//! Rendering primitives and the surfaces they draw on.
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Surface`]: the abstract drawing target, with a Cairo implementation
//!   ([`CairoSurface`]) and a recording one ([`Recorder`])
//! - [`primitives`]: square, circle, line, arc and cursor-marker rasterization
//! - [`Shape`]: the same primitives as data
//! - [`Canvas`]: the offscreen image a scene is rendered into

pub mod canvas;
pub mod color;
pub mod primitives;
pub mod record;
pub mod shape;
pub mod surface;

pub use canvas::Canvas;
pub use color::Color;
pub use primitives::{draw_arc, draw_circle, draw_cursor, draw_cursor_with, draw_line, draw_square};
pub use record::{DrawOp, DrawStats, Recorder};
pub use shape::Shape;
pub use surface::{CairoSurface, Surface};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
