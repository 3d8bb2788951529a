use std::fmt;

use super::ShaderStage;

/// Failure while turning shader sources into a usable program.
///
/// All variants are fatal to setup: no program handle is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// A single stage failed to parse or validate.
    Compile {
        stage: ShaderStage,
        label: String,
        diagnostic: String,
    },
    /// Both stages compiled but do not form a valid program.
    Link { label: String, diagnostic: String },
    /// A vertex attribute the renderer binds is not declared by the program.
    MissingAttribute { label: String, name: String },
    /// A uniform the renderer uploads is not declared by the program.
    MissingUniform { label: String, name: String },
    /// The program is valid WGSL but uses something the backend cannot drive.
    Unsupported { label: String, diagnostic: String },
}

impl ShaderError {
    pub(crate) fn compile(stage: ShaderStage, label: &str, diagnostic: impl Into<String>) -> Self {
        Self::Compile {
            stage,
            label: label.to_owned(),
            diagnostic: diagnostic.into(),
        }
    }

    pub(crate) fn link(label: &str, diagnostic: impl Into<String>) -> Self {
        Self::Link {
            label: label.to_owned(),
            diagnostic: diagnostic.into(),
        }
    }

    pub fn unsupported(label: &str, diagnostic: impl Into<String>) -> Self {
        Self::Unsupported {
            label: label.to_owned(),
            diagnostic: diagnostic.into(),
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile { stage, label, diagnostic } => {
                write!(f, "failed to compile {stage} shader `{label}`:\n{diagnostic}")
            }
            Self::Link { label, diagnostic } => {
                write!(f, "failed to link shader program `{label}`: {diagnostic}")
            }
            Self::MissingAttribute { label, name } => {
                write!(f, "shader program `{label}` has no vertex attribute `{name}`")
            }
            Self::MissingUniform { label, name } => {
                write!(f, "shader program `{label}` has no uniform `{name}`")
            }
            Self::Unsupported { label, diagnostic } => {
                write!(f, "shader program `{label}` is not supported: {diagnostic}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}
