//! Library exports for drawpp.
//!
//! The binary is a thin shell around these modules: [`scene`] picks what to
//! draw, [`draw`] rasterizes it through the [`draw::Surface`] trait,
//! [`cursor`] and [`animation`] move the turtle-style cursor, [`script`]
//! interprets Draw++ programs and [`backend`] shows the result in a Wayland
//! window.

pub mod animation;
pub mod backend;
pub mod config;
pub mod cursor;
pub mod draw;
pub mod scene;
pub mod script;
pub mod util;

pub use config::Config;
