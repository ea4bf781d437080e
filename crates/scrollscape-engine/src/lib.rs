//! Scrollscape engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the studio: window loop,
//! device/surface, input translation, frame timing, mesh generation and the
//! shader-material scene renderer.

pub mod core;
pub mod device;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
