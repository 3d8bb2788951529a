//! Shader program builder: compile, link, resolve names, create the device program.

use prism_engine::render::{
    GraphicsBackend, ProgramDesc, ProgramHandle, Topology, VertexAttribute, VertexFormat,
};
use prism_engine::shader::{compile, link, LinkedProgram, ShaderError, ShaderStage};

use crate::shaders::{
    ATTR_COLOR, ATTR_POSITION, CUBE_FRAGMENT, CUBE_VERTEX, QUAD_FRAGMENT, QUAD_VERTEX,
    UNIFORM_MODEL_VIEW, UNIFORM_PROJECTION,
};

/// A vertex/fragment pair plus the buffer layout it is fed with.
#[derive(Debug, Copy, Clone)]
pub struct ProgramSource {
    pub label: &'static str,
    pub vertex: &'static str,
    pub fragment: &'static str,
    pub position_format: VertexFormat,
    /// `None` when the program takes no per-vertex color.
    pub color_format: Option<VertexFormat>,
    pub topology: Topology,
}

pub const CUBE_PROGRAM: ProgramSource = ProgramSource {
    label: "cube",
    vertex: CUBE_VERTEX,
    fragment: CUBE_FRAGMENT,
    position_format: VertexFormat::Float32x3,
    color_format: Some(VertexFormat::Float32x4),
    topology: Topology::TriangleList,
};

pub const QUAD_PROGRAM: ProgramSource = ProgramSource {
    label: "quad",
    vertex: QUAD_VERTEX,
    fragment: QUAD_FRAGMENT,
    position_format: VertexFormat::Float32x2,
    color_format: None,
    topology: Topology::TriangleStrip,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttribLocations {
    pub vertex_position: VertexAttribute,
    pub vertex_color: Option<VertexAttribute>,
}

/// Bind group 0 bindings of the two matrices.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformLocations {
    pub projection_matrix: u32,
    pub model_view_matrix: u32,
}

/// A ready-to-draw program and where its inputs live.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub program: ProgramHandle,
    pub topology: Topology,
    pub attrib_locations: AttribLocations,
    pub uniform_locations: UniformLocations,
}

/// Builds the device program for `source`.
///
/// Any failure is logged and returned; nothing is created on the device
/// unless both stages compile, link, and expose every name the renderer uses.
pub fn init_shader_program<B>(backend: &mut B, source: &ProgramSource) -> Result<ProgramInfo, ShaderError>
where
    B: GraphicsBackend + ?Sized,
{
    let result = build_program(backend, source);
    if let Err(err) = &result {
        log::error!("unable to initialize the shader program: {err}");
    }
    result
}

fn build_program<B>(backend: &mut B, source: &ProgramSource) -> Result<ProgramInfo, ShaderError>
where
    B: GraphicsBackend + ?Sized,
{
    let vertex = compile(ShaderStage::Vertex, source.label, source.vertex)?;
    let fragment = compile(ShaderStage::Fragment, source.label, source.fragment)?;
    let linked = link(source.label, vertex, fragment)?;

    let vertex_position = resolve_attribute(&linked, ATTR_POSITION, source.position_format)?;
    let vertex_color = source
        .color_format
        .map(|format| resolve_attribute(&linked, ATTR_COLOR, format))
        .transpose()?;

    let uniform_locations = UniformLocations {
        projection_matrix: linked.uniform(UNIFORM_PROJECTION)?.binding,
        model_view_matrix: linked.uniform(UNIFORM_MODEL_VIEW)?.binding,
    };

    let mut attributes = vec![vertex_position];
    attributes.extend(vertex_color);

    let program = backend.create_program(&ProgramDesc {
        program: &linked,
        attributes: &attributes,
        topology: source.topology,
        depth_test: true,
    })?;

    log::debug!(
        "program `{}` ready: {} attribute(s), {} uniform(s)",
        linked.label(),
        attributes.len(),
        linked.uniforms().len()
    );

    Ok(ProgramInfo {
        program,
        topology: source.topology,
        attrib_locations: AttribLocations { vertex_position, vertex_color },
        uniform_locations,
    })
}

/// Location of `name`, checked against the format its buffer holds.
fn resolve_attribute(
    linked: &LinkedProgram,
    name: &str,
    format: VertexFormat,
) -> Result<VertexAttribute, ShaderError> {
    let info = linked.attribute(name)?;
    if info.format != Some(format) {
        return Err(ShaderError::Link {
            label: linked.label().to_owned(),
            diagnostic: format!(
                "attribute `{name}` is declared as {:?} but its buffer holds {format:?}",
                info.format
            ),
        });
    }
    Ok(VertexAttribute::packed(info.location, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingBackend;

    #[test]
    fn cube_program_resolves_all_locations() {
        let mut backend = RecordingBackend::new();
        let info = init_shader_program(&mut backend, &CUBE_PROGRAM).unwrap();

        assert_eq!(info.attrib_locations.vertex_position, VertexAttribute::packed(0, VertexFormat::Float32x3));
        assert_eq!(info.attrib_locations.vertex_color, Some(VertexAttribute::packed(1, VertexFormat::Float32x4)));
        assert_eq!(info.uniform_locations, UniformLocations { projection_matrix: 0, model_view_matrix: 1 });
        assert_eq!(backend.programs.len(), 1);
        assert_eq!(backend.programs[0].label, "cube");
        assert_eq!(backend.programs[0].topology, Topology::TriangleList);
        assert!(backend.programs[0].depth_test);
    }

    #[test]
    fn quad_program_has_no_color_attribute() {
        let mut backend = RecordingBackend::new();
        let info = init_shader_program(&mut backend, &QUAD_PROGRAM).unwrap();

        assert_eq!(info.attrib_locations.vertex_color, None);
        assert_eq!(backend.programs[0].attributes.len(), 1);
        assert_eq!(backend.programs[0].topology, Topology::TriangleStrip);
    }

    #[test]
    fn compile_failure_creates_no_program() {
        let mut backend = RecordingBackend::new();
        let broken = ProgramSource {
            fragment: "@fragment fn fs_main() -> @location(0) vec4<f32> { return nope; }",
            ..CUBE_PROGRAM
        };

        let err = init_shader_program(&mut backend, &broken).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Fragment, .. }));
        assert!(backend.programs.is_empty());
    }

    #[test]
    fn missing_color_attribute_is_an_error() {
        let mut backend = RecordingBackend::new();
        let colorless = ProgramSource {
            color_format: Some(VertexFormat::Float32x4),
            ..QUAD_PROGRAM
        };

        let err = init_shader_program(&mut backend, &colorless).unwrap_err();
        assert_eq!(
            err,
            ShaderError::MissingAttribute { label: "quad".into(), name: ATTR_COLOR.into() }
        );
        assert!(backend.programs.is_empty());
    }

    #[test]
    fn mismatched_position_format_is_a_link_error() {
        let mut backend = RecordingBackend::new();
        let wrong = ProgramSource {
            position_format: VertexFormat::Float32x2,
            ..CUBE_PROGRAM
        };

        let err = init_shader_program(&mut backend, &wrong).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
    }
}
