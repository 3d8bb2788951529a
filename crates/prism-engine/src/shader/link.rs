use crate::render::VertexFormat;

use super::{CompiledShader, ShaderError, ShaderStage};

/// A vertex attribute declared by the vertex stage.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInfo {
    pub name: String,
    pub location: u32,
    /// `None` when the attribute type has no vertex-buffer format (e.g. integers).
    pub format: Option<VertexFormat>,
}

/// A uniform shared by the program, with the stages that read it.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformInfo {
    pub name: String,
    pub binding: u32,
    pub vertex: bool,
    pub fragment: bool,
    pub is_mat4: bool,
}

/// A vertex + fragment pair whose interfaces agree.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    label: String,
    vertex: CompiledShader,
    fragment: CompiledShader,
    attributes: Vec<AttributeInfo>,
    uniforms: Vec<UniformInfo>,
}

/// Links two compiled stages into a program.
///
/// Rules:
/// - `vertex` and `fragment` must be compiled for those stages
/// - every fragment input location must be a vertex output of the same type
/// - uniforms live in bind group 0; a name maps to one binding and vice versa
pub fn link(
    label: &str,
    vertex: CompiledShader,
    fragment: CompiledShader,
) -> Result<LinkedProgram, ShaderError> {
    for (shader, expected) in [(&vertex, ShaderStage::Vertex), (&fragment, ShaderStage::Fragment)] {
        if shader.stage() != expected {
            return Err(ShaderError::link(
                label,
                format!("`{}` is a {} shader, expected {expected}", shader.label(), shader.stage()),
            ));
        }
    }

    let outputs = vertex.outputs();
    for input in fragment.inputs() {
        let Some(output) = outputs.iter().find(|o| o.location == input.location) else {
            return Err(ShaderError::link(
                label,
                format!(
                    "fragment input `{}` at location {} is not written by the vertex stage",
                    input.name, input.location
                ),
            ));
        };
        if output.ty != input.ty {
            return Err(ShaderError::link(
                label,
                format!(
                    "location {}: vertex output `{}` and fragment input `{}` differ in type",
                    input.location, output.name, input.name
                ),
            ));
        }
    }

    // Each uniform keeps its naga type so both stages can be compared in full.
    let mut uniforms: Vec<(UniformInfo, naga::TypeInner)> = Vec::new();
    for (stage, vars) in [
        (ShaderStage::Vertex, vertex.uniforms()),
        (ShaderStage::Fragment, fragment.uniforms()),
    ] {
        for var in vars {
            if var.group != 0 {
                return Err(ShaderError::link(
                    label,
                    format!("uniform `{}` is in group {}; only group 0 is supported", var.name, var.group),
                ));
            }

            let is_mat4 = matches!(
                var.ty,
                naga::TypeInner::Matrix {
                    columns: naga::VectorSize::Quad,
                    rows: naga::VectorSize::Quad,
                    scalar: naga::Scalar::F32,
                }
            );

            match uniforms
                .iter_mut()
                .find(|(u, _)| u.name == var.name || u.binding == var.binding)
            {
                Some((existing, ty)) if existing.name == var.name && existing.binding == var.binding => {
                    if *ty != var.ty {
                        return Err(ShaderError::link(
                            label,
                            format!("uniform `{}` has different types per stage", var.name),
                        ));
                    }
                    mark_stage(existing, stage);
                }
                Some((existing, _)) => {
                    return Err(ShaderError::link(
                        label,
                        format!(
                            "uniform `{}` (binding {}) conflicts with `{}` (binding {})",
                            var.name, var.binding, existing.name, existing.binding
                        ),
                    ));
                }
                None => {
                    let mut info = UniformInfo {
                        name: var.name,
                        binding: var.binding,
                        vertex: false,
                        fragment: false,
                        is_mat4,
                    };
                    mark_stage(&mut info, stage);
                    uniforms.push((info, var.ty));
                }
            }
        }
    }
    uniforms.sort_by_key(|(u, _)| u.binding);
    let uniforms = uniforms.into_iter().map(|(u, _)| u).collect();

    let attributes = vertex
        .inputs()
        .into_iter()
        .map(|io| AttributeInfo {
            format: VertexFormat::from_naga(&io.ty),
            name: io.name,
            location: io.location,
        })
        .collect();

    log::debug!("linked shader program `{label}`");

    Ok(LinkedProgram {
        label: label.to_owned(),
        vertex,
        fragment,
        attributes,
        uniforms,
    })
}

fn mark_stage(info: &mut UniformInfo, stage: ShaderStage) {
    match stage {
        ShaderStage::Vertex => info.vertex = true,
        ShaderStage::Fragment => info.fragment = true,
    }
}

impl LinkedProgram {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertex(&self) -> &CompiledShader {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledShader {
        &self.fragment
    }

    /// Uniforms sorted by binding.
    pub fn uniforms(&self) -> &[UniformInfo] {
        &self.uniforms
    }

    /// Resolves a vertex attribute by name. A missing name is an error.
    pub fn attribute(&self, name: &str) -> Result<&AttributeInfo, ShaderError> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| ShaderError::MissingAttribute {
                label: self.label.clone(),
                name: name.to_owned(),
            })
    }

    /// Resolves a uniform by name. A missing name is an error.
    pub fn uniform(&self, name: &str) -> Result<&UniformInfo, ShaderError> {
        self.uniforms
            .iter()
            .find(|u| u.name == name)
            .ok_or_else(|| ShaderError::MissingUniform {
                label: self.label.clone(),
                name: name.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::compile;

    const VS: &str = r#"
        @group(0) @binding(0) var<uniform> u_projection: mat4x4<f32>;
        @group(0) @binding(1) var<uniform> u_model_view: mat4x4<f32>;

        struct Out {
            @builtin(position) position: vec4<f32>,
            @location(0) color: vec4<f32>,
        };

        @vertex
        fn vs_main(@location(0) a_position: vec3<f32>, @location(1) a_color: vec4<f32>) -> Out {
            var out: Out;
            out.position = u_projection * u_model_view * vec4<f32>(a_position, 1.0);
            out.color = a_color;
            return out;
        }
    "#;

    const FS: &str = r#"
        @fragment
        fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
            return color;
        }
    "#;

    fn vs(src: &str) -> CompiledShader {
        compile(ShaderStage::Vertex, "vs", src).unwrap()
    }

    fn fs(src: &str) -> CompiledShader {
        compile(ShaderStage::Fragment, "fs", src).unwrap()
    }

    #[test]
    fn links_matching_pair() {
        let program = link("cube", vs(VS), fs(FS)).unwrap();

        let pos = program.attribute("a_position").unwrap();
        assert_eq!(pos.location, 0);
        assert_eq!(pos.format, Some(VertexFormat::Float32x3));

        let color = program.attribute("a_color").unwrap();
        assert_eq!(color.location, 1);
        assert_eq!(color.format, Some(VertexFormat::Float32x4));

        let proj = program.uniform("u_projection").unwrap();
        assert_eq!(proj.binding, 0);
        assert!(proj.vertex && !proj.fragment && proj.is_mat4);
        assert_eq!(program.uniform("u_model_view").unwrap().binding, 1);
    }

    #[test]
    fn missing_names_are_errors() {
        let program = link("cube", vs(VS), fs(FS)).unwrap();
        assert_eq!(
            program.attribute("a_normal").unwrap_err(),
            ShaderError::MissingAttribute { label: "cube".into(), name: "a_normal".into() }
        );
        assert!(matches!(
            program.uniform("u_time"),
            Err(ShaderError::MissingUniform { .. })
        ));
    }

    #[test]
    fn unmatched_fragment_input_fails_to_link() {
        let fs_src = r#"
            @fragment
            fn fs_main(@location(3) uv: vec2<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(uv, 0.0, 1.0);
            }
        "#;
        let err = link("cube", vs(VS), fs(fs_src)).unwrap_err();
        match err {
            ShaderError::Link { diagnostic, .. } => assert!(diagnostic.contains("location 3")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn type_mismatch_fails_to_link() {
        let fs_src = r#"
            @fragment
            fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(color, 1.0);
            }
        "#;
        assert!(matches!(link("cube", vs(VS), fs(fs_src)), Err(ShaderError::Link { .. })));
    }

    #[test]
    fn swapped_stages_fail_to_link() {
        let v = vs(VS);
        let f = fs(FS);
        assert!(matches!(link("cube", f, v), Err(ShaderError::Link { .. })));
    }

    #[test]
    fn conflicting_uniform_binding_fails_to_link() {
        let fs_src = r#"
            @group(0) @binding(0) var<uniform> u_tint: vec4<f32>;

            @fragment
            fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
                return color * u_tint;
            }
        "#;
        assert!(matches!(link("cube", vs(VS), fs(fs_src)), Err(ShaderError::Link { .. })));
    }

    #[test]
    fn shared_uniform_is_visible_to_both_stages() {
        let fs_src = r#"
            @group(0) @binding(1) var<uniform> u_model_view: mat4x4<f32>;

            @fragment
            fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
                return u_model_view * color;
            }
        "#;
        let program = link("cube", vs(VS), fs(fs_src)).unwrap();
        let mv = program.uniform("u_model_view").unwrap();
        assert!(mv.vertex && mv.fragment);
        assert_eq!(program.uniforms().len(), 2);
    }

    #[test]
    fn shared_uniform_with_different_vector_types_fails_to_link() {
        let vs_src = r#"
            @group(0) @binding(2) var<uniform> u_tint: vec4<f32>;

            struct Out {
                @builtin(position) position: vec4<f32>,
                @location(0) color: vec4<f32>,
            };

            @vertex
            fn vs_main(@location(0) a_position: vec3<f32>) -> Out {
                var out: Out;
                out.position = vec4<f32>(a_position, 1.0);
                out.color = u_tint;
                return out;
            }
        "#;
        let fs_src = r#"
            @group(0) @binding(2) var<uniform> u_tint: vec3<f32>;

            @fragment
            fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
                return color * vec4<f32>(u_tint, 1.0);
            }
        "#;
        match link("tint", vs(vs_src), fs(fs_src)).unwrap_err() {
            ShaderError::Link { diagnostic, .. } => assert!(diagnostic.contains("u_tint")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
