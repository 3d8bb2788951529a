//! GPU rendering subsystem.
//!
//! Renderers describe a frame as a [`DrawPass`] (clear values, program,
//! attribute buffers, uniform values, one draw call) and hand it to a
//! [`GraphicsBackend`]. [`WgpuBackend`] executes passes on the window's device;
//! tests substitute a recording backend.
//!
//! Resources are addressed by small copyable handles issued by the backend
//! that created them.

mod api;
mod backend;
mod ctx;
mod wgpu_backend;

pub use api::{
    AttributeBinding, BufferHandle, BufferUsage, DrawCall, DrawPass, IndexFormat, ProgramDesc,
    ProgramHandle, Topology, UniformUpload, VertexAttribute, VertexFormat,
};
pub use backend::GraphicsBackend;
pub use ctx::{RenderCtx, RenderTarget};
pub use wgpu_backend::{GpuResources, WgpuBackend};
