//! Two small GPU demos built on `prism-engine`: a rotating cube with one color
//! per face and a static white quad.

pub mod buffers;
pub mod driver;
pub mod geometry;
pub mod program;
pub mod renderer;
pub mod scene;
pub mod shaders;

#[cfg(test)]
mod testing;
