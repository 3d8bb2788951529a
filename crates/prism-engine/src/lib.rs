//! Prism engine crate.
//!
//! Platform and GPU runtime for the prism demos: window + event loop, wgpu
//! device management, shader compilation, and a small command layer that the
//! demo renderers target.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod render;
pub mod shader;
