use std::fmt;

use super::ShaderError;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }

    fn to_naga(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user-defined stage input or output (`@location(n)`).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IoVar {
    pub name: String,
    pub location: u32,
    pub ty: naga::TypeInner,
}

/// A `var<uniform>` global.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UniformVar {
    pub name: String,
    pub group: u32,
    pub binding: u32,
    pub ty: naga::TypeInner,
}

/// One validated stage: the WGSL text plus its naga IR for reflection.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    stage: ShaderStage,
    label: String,
    source: String,
    module: naga::Module,
    entry_index: usize,
}

/// Parses and validates `source` as a single-stage WGSL module.
///
/// The module must declare exactly one entry point for `stage`. Errors carry
/// naga's rendered diagnostic (with source excerpt for parse errors).
pub fn compile(stage: ShaderStage, label: &str, source: &str) -> Result<CompiledShader, ShaderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| ShaderError::compile(stage, label, e.emit_to_string(source)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    validator
        .validate(&module)
        .map_err(|e| ShaderError::compile(stage, label, error_chain(&e)))?;

    let mut entries = module
        .entry_points
        .iter()
        .enumerate()
        .filter(|(_, ep)| ep.stage == stage.to_naga());

    let entry_index = match (entries.next(), entries.next()) {
        (Some((i, _)), None) => i,
        (None, _) => {
            return Err(ShaderError::compile(
                stage,
                label,
                format!("no @{stage} entry point"),
            ));
        }
        (Some(_), Some(_)) => {
            return Err(ShaderError::compile(
                stage,
                label,
                format!("more than one @{stage} entry point"),
            ));
        }
    };

    log::debug!("compiled {stage} shader `{label}`");

    Ok(CompiledShader {
        stage,
        label: label.to_owned(),
        source: source.to_owned(),
        module,
        entry_index,
    })
}

impl CompiledShader {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The WGSL text, handed to the device as-is.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn entry_point(&self) -> &str {
        &self.entry().name
    }

    fn entry(&self) -> &naga::EntryPoint {
        &self.module.entry_points[self.entry_index]
    }

    /// `@location` inputs of the entry point, struct arguments flattened.
    pub(crate) fn inputs(&self) -> Vec<IoVar> {
        let mut out = Vec::new();
        for arg in &self.entry().function.arguments {
            collect_io(&self.module, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut out);
        }
        out
    }

    /// `@location` outputs of the entry point, struct results flattened.
    pub(crate) fn outputs(&self) -> Vec<IoVar> {
        let mut out = Vec::new();
        if let Some(result) = &self.entry().function.result {
            collect_io(&self.module, None, result.ty, result.binding.as_ref(), &mut out);
        }
        out
    }

    /// Uniform-address-space globals declared by the module.
    pub(crate) fn uniforms(&self) -> Vec<UniformVar> {
        self.module
            .global_variables
            .iter()
            .filter(|(_, var)| var.space == naga::AddressSpace::Uniform)
            .filter_map(|(_, var)| {
                let binding = var.binding.as_ref()?;
                Some(UniformVar {
                    name: var.name.clone().unwrap_or_default(),
                    group: binding.group,
                    binding: binding.binding,
                    ty: self.module.types[var.ty].inner.clone(),
                })
            })
            .collect()
    }
}

fn collect_io(
    module: &naga::Module,
    name: Option<&str>,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<IoVar>,
) {
    let inner = &module.types[ty].inner;
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(IoVar {
            name: name.unwrap_or_default().to_owned(),
            location: *location,
            ty: inner.clone(),
        }),
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = inner {
                for m in members {
                    collect_io(module, m.name.as_deref(), m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        text.push_str(": ");
        text.push_str(&e.to_string());
        source = e.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = r#"
        @group(0) @binding(0) var<uniform> u_mvp: mat4x4<f32>;

        struct Out {
            @builtin(position) position: vec4<f32>,
            @location(0) color: vec4<f32>,
        };

        @vertex
        fn vs_main(@location(0) a_position: vec3<f32>, @location(1) a_color: vec4<f32>) -> Out {
            var out: Out;
            out.position = u_mvp * vec4<f32>(a_position, 1.0);
            out.color = a_color;
            return out;
        }
    "#;

    #[test]
    fn reflects_inputs_outputs_and_uniforms() {
        let vs = compile(ShaderStage::Vertex, "test", VS).unwrap();
        assert_eq!(vs.entry_point(), "vs_main");

        let inputs = vs.inputs();
        assert_eq!(inputs.len(), 2);
        assert_eq!((inputs[0].name.as_str(), inputs[0].location), ("a_position", 0));
        assert_eq!((inputs[1].name.as_str(), inputs[1].location), ("a_color", 1));

        // The builtin position is not a user output.
        let outputs = vs.outputs();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].location, 0);

        let uniforms = vs.uniforms();
        assert_eq!(uniforms.len(), 1);
        assert_eq!(uniforms[0].name, "u_mvp");
        assert_eq!((uniforms[0].group, uniforms[0].binding), (0, 0));
    }

    #[test]
    fn syntax_error_reports_diagnostic() {
        let err = compile(ShaderStage::Vertex, "broken", "@vertex fn vs_main( -> {").unwrap_err();
        match err {
            ShaderError::Compile { stage, label, diagnostic } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert_eq!(label, "broken");
                assert!(!diagnostic.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn type_error_is_a_compile_error() {
        let src = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                return 1.0;
            }
        "#;
        let err = compile(ShaderStage::Fragment, "bad-return", src).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn wrong_stage_is_rejected() {
        let err = compile(ShaderStage::Fragment, "vs-as-fs", VS).unwrap_err();
        match err {
            ShaderError::Compile { diagnostic, .. } => assert!(diagnostic.contains("fragment")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn display_names_stage_and_label() {
        let err = ShaderError::compile(ShaderStage::Fragment, "quad", "boom");
        assert_eq!(err.to_string(), "failed to compile fragment shader `quad`:\nboom");
    }
}
