//! Shader compilation and program linking.
//!
//! WGSL is parsed and validated with naga before anything reaches the GPU, so
//! compile and link diagnostics are available as plain text (and testable
//! without a device). A [`LinkedProgram`] is the only input the render backend
//! accepts for pipeline creation: an unlinked pair can never be drawn with.

mod compile;
mod error;
mod link;

pub use compile::{compile, CompiledShader, ShaderStage};
pub use error::ShaderError;
pub use link::{link, AttributeInfo, LinkedProgram, UniformInfo};
