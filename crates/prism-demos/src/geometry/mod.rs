//! Hard-coded geometry uploaded once at startup.

pub mod cube;
pub mod quad;
