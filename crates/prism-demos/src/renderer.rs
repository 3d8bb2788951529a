//! Frame renderer: one cleared pass with one draw call.

use glam::Mat4;
use prism_engine::coords::Viewport;
use prism_engine::render::{
    AttributeBinding, DrawCall, DrawPass, GraphicsBackend, IndexFormat, UniformUpload,
};

use crate::buffers::{CubeBuffers, QuadBuffers};
use crate::geometry::{cube, quad};
use crate::program::ProgramInfo;
use crate::scene::SceneParams;

fn matrices(info: &ProgramInfo, projection: Mat4, model_view: Mat4) -> Vec<UniformUpload> {
    vec![
        UniformUpload {
            binding: info.uniform_locations.projection_matrix,
            value: projection,
        },
        UniformUpload {
            binding: info.uniform_locations.model_view_matrix,
            value: model_view,
        },
    ]
}

/// The cube at `rotation` radians as an indexed triangle list.
pub fn cube_pass(
    info: &ProgramInfo,
    buffers: &CubeBuffers,
    params: &SceneParams,
    viewport: Viewport,
    rotation: f32,
) -> DrawPass {
    let mut attributes = vec![AttributeBinding {
        attribute: info.attrib_locations.vertex_position,
        buffer: buffers.position,
    }];
    if let Some(color) = info.attrib_locations.vertex_color {
        attributes.push(AttributeBinding {
            attribute: color,
            buffer: buffers.color,
        });
    }

    DrawPass {
        clear_color: params.clear_color,
        clear_depth: params.clear_depth,
        program: info.program,
        topology: info.topology,
        attributes,
        uniforms: matrices(
            info,
            params.projection_matrix(viewport),
            params.model_view_matrix(Some(rotation)),
        ),
        draw: DrawCall::Indexed {
            index_buffer: buffers.indices,
            format: IndexFormat::Uint16,
            count: cube::INDEX_COUNT as u32,
        },
    }
}

pub fn draw_cube<B: GraphicsBackend + ?Sized>(
    backend: &mut B,
    info: &ProgramInfo,
    buffers: &CubeBuffers,
    params: &SceneParams,
    rotation: f32,
) {
    let pass = cube_pass(info, buffers, params, backend.viewport(), rotation);
    backend.submit(&pass);
}

/// The static quad as a 4-vertex strip.
pub fn quad_pass(
    info: &ProgramInfo,
    buffers: &QuadBuffers,
    params: &SceneParams,
    viewport: Viewport,
) -> DrawPass {
    DrawPass {
        clear_color: params.clear_color,
        clear_depth: params.clear_depth,
        program: info.program,
        topology: info.topology,
        attributes: vec![AttributeBinding {
            attribute: info.attrib_locations.vertex_position,
            buffer: buffers.position,
        }],
        uniforms: matrices(
            info,
            params.projection_matrix(viewport),
            params.model_view_matrix(None),
        ),
        draw: DrawCall::Arrays {
            first: 0,
            count: quad::VERTEX_COUNT as u32,
        },
    }
}

pub fn draw_quad<B: GraphicsBackend + ?Sized>(
    backend: &mut B,
    info: &ProgramInfo,
    buffers: &QuadBuffers,
    params: &SceneParams,
) {
    let pass = quad_pass(info, buffers, params, backend.viewport());
    backend.submit(&pass);
}
