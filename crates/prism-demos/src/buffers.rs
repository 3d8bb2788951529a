//! Uploads the hard-coded geometry into device buffers.

use prism_engine::render::{BufferHandle, BufferUsage, GraphicsBackend};

use crate::geometry::{cube, quad};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CubeBuffers {
    pub position: BufferHandle,
    pub color: BufferHandle,
    pub indices: BufferHandle,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QuadBuffers {
    pub position: BufferHandle,
}

pub fn init_cube_buffers<B: GraphicsBackend + ?Sized>(backend: &mut B) -> CubeBuffers {
    CubeBuffers {
        position: backend.create_buffer(
            "cube positions",
            BufferUsage::Vertex,
            bytemuck::cast_slice(&cube::POSITIONS),
        ),
        color: backend.create_buffer(
            "cube colors",
            BufferUsage::Vertex,
            bytemuck::cast_slice(&cube::COLORS),
        ),
        indices: backend.create_buffer(
            "cube indices",
            BufferUsage::Index,
            bytemuck::cast_slice(&cube::INDICES),
        ),
    }
}

pub fn init_quad_buffers<B: GraphicsBackend + ?Sized>(backend: &mut B) -> QuadBuffers {
    QuadBuffers {
        position: backend.create_buffer(
            "quad positions",
            BufferUsage::Vertex,
            bytemuck::cast_slice(&quad::POSITIONS),
        ),
    }
}
