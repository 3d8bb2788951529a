//! Coordinate types shared by the runtime and renderers.
//!
//! Sizes are in logical pixels (DPI-aware). Projection math lives with the
//! demos; the engine only reports how large the drawable is.

mod viewport;

pub use viewport::Viewport;
