//! Engine error taxonomy.
//!
//! Every variant is fatal for the animation. Transient presentation problems
//! (lost/outdated surface, acquire timeout) never surface as errors; the device layer
//! absorbs them and the frame is skipped.

use std::fmt;

/// Pipeline stage a shader diagnostic refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug)]
pub enum GraphicsError {
    /// Window, surface, adapter or device could not be created.
    Initialization(String),
    /// A shader source failed to parse or validate, or lacks its entry point.
    ShaderCompile {
        stage: ShaderStage,
        label: String,
        message: String,
    },
    /// A program has no uniform with the requested name.
    UniformNotFound { program: String, name: String },
    /// Position and color data do not describe the same whole triangles, or hold more
    /// vertices than one draw call takes.
    MeshLayout {
        label: String,
        positions: usize,
        colors: usize,
    },
    /// Presentation failed in a way that cannot be retried.
    SurfaceFatal(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialization(msg) => write!(f, "graphics initialization failed: {msg}"),
            Self::ShaderCompile {
                stage,
                label,
                message,
            } => write!(f, "{stage} shader `{label}` failed to compile:\n{message}"),
            Self::UniformNotFound { program, name } => {
                write!(f, "program `{program}` has no uniform named `{name}`")
            }
            Self::MeshLayout {
                label,
                positions,
                colors,
            } => write!(
                f,
                "mesh `{label}` has {positions} positions and {colors} colors; \
                 both must be equal and a multiple of 3, within one draw call"
            ),
            Self::SurfaceFatal(msg) => write!(f, "surface presentation failed: {msg}"),
        }
    }
}

impl std::error::Error for GraphicsError {}

pub type Result<T> = std::result::Result<T, GraphicsError>;
