//! Canvas-2D rendering module
//!
//! Draws the particle field as filled petal/heart paths on a transparent
//! full-viewport canvas, device-pixel-ratio aware.

pub mod canvas;
pub mod shapes;

pub use canvas::CanvasSurface;
