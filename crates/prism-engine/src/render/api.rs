use glam::Mat4;

use crate::paint::Color;
use crate::shader::LinkedProgram;

/// Device buffer created by a [`GraphicsBackend`](super::GraphicsBackend).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferHandle(pub(crate) u32);

/// Linked, device-side program (a render pipeline on wgpu).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramHandle(pub(crate) u32);

impl BufferHandle {
    /// Handle for the `index`-th buffer a backend created.
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl ProgramHandle {
    /// Handle for the `index`-th program a backend created.
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferUsage {
    Vertex,
    Index,
}

/// Per-vertex attribute format: component count and numeric type.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VertexFormat {
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
}

impl VertexFormat {
    pub const fn components(self) -> u32 {
        match self {
            Self::Float32 => 1,
            Self::Float32x2 => 2,
            Self::Float32x3 => 3,
            Self::Float32x4 => 4,
        }
    }

    /// Size of one element in bytes.
    pub const fn size(self) -> u64 {
        self.components() as u64 * 4
    }

    pub(crate) fn from_naga(inner: &naga::TypeInner) -> Option<Self> {
        match *inner {
            naga::TypeInner::Scalar(naga::Scalar::F32) => Some(Self::Float32),
            naga::TypeInner::Vector { size, scalar: naga::Scalar::F32 } => Some(match size {
                naga::VectorSize::Bi => Self::Float32x2,
                naga::VectorSize::Tri => Self::Float32x3,
                naga::VectorSize::Quad => Self::Float32x4,
            }),
            _ => None,
        }
    }

    pub(crate) fn to_wgpu(self) -> wgpu::VertexFormat {
        match self {
            Self::Float32 => wgpu::VertexFormat::Float32,
            Self::Float32x2 => wgpu::VertexFormat::Float32x2,
            Self::Float32x3 => wgpu::VertexFormat::Float32x3,
            Self::Float32x4 => wgpu::VertexFormat::Float32x4,
        }
    }
}

/// How one attribute is pulled from its buffer.
///
/// `stride == 0` means tightly packed (`stride == format.size()`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    pub format: VertexFormat,
    pub stride: u64,
    pub offset: u64,
}

impl VertexAttribute {
    /// Tightly packed attribute starting at byte 0.
    pub const fn packed(location: u32, format: VertexFormat) -> Self {
        Self {
            location,
            format,
            stride: 0,
            offset: 0,
        }
    }

    pub const fn effective_stride(&self) -> u64 {
        if self.stride == 0 { self.format.size() } else { self.stride }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Topology {
    TriangleList,
    TriangleStrip,
}

impl Topology {
    pub(crate) fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            Self::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IndexFormat {
    Uint16,
}

impl IndexFormat {
    pub(crate) fn to_wgpu(self) -> wgpu::IndexFormat {
        match self {
            Self::Uint16 => wgpu::IndexFormat::Uint16,
        }
    }
}

/// Everything needed to turn a linked program into a device program.
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    pub program: &'a LinkedProgram,
    /// One buffer per attribute, in vertex-buffer slot order.
    pub attributes: &'a [VertexAttribute],
    pub topology: Topology,
    /// Depth test with `LessEqual` and depth writes.
    pub depth_test: bool,
}

/// Attribute location fed from `buffer`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeBinding {
    pub attribute: VertexAttribute,
    pub buffer: BufferHandle,
}

/// `mat4x4<f32>` value for the uniform at `binding`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformUpload {
    pub binding: u32,
    pub value: Mat4,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawCall {
    /// `count` indices from `index_buffer`.
    Indexed {
        index_buffer: BufferHandle,
        format: IndexFormat,
        count: u32,
    },
    /// `count` consecutive vertices starting at `first`.
    Arrays { first: u32, count: u32 },
}

impl DrawCall {
    /// Number of vertices the call assembles into primitives.
    pub const fn vertex_count(&self) -> u32 {
        match *self {
            Self::Indexed { count, .. } | Self::Arrays { count, .. } => count,
        }
    }
}

/// One cleared, single-draw render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPass {
    pub clear_color: Color,
    pub clear_depth: f32,
    pub program: ProgramHandle,
    pub topology: Topology,
    pub attributes: Vec<AttributeBinding>,
    pub uniforms: Vec<UniformUpload>,
    pub draw: DrawCall,
}
