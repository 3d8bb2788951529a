//! Color representation used for clear values and vertex colors.

pub mod color;

pub use color::Color;
