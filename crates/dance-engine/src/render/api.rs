use crate::camera::TransformUniform;
use crate::error::Result;

use super::shader::ShaderSource;

/// Per-vertex attribute streams.
///
/// Each attribute lives in its own tightly packed buffer and is read through the slot
/// of the same index (slot == shader location).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Attribute {
    Position,
    Color,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Position, Attribute::Color];

    #[inline]
    pub const fn slot(self) -> u32 {
        match self {
            Self::Position => 0,
            Self::Color => 1,
        }
    }

    /// Floats per vertex.
    #[inline]
    pub const fn components(self) -> u32 {
        3
    }

    /// Byte distance between consecutive vertices (no interleaving, no padding).
    #[inline]
    pub const fn stride(self) -> u64 {
        self.components() as u64 * std::mem::size_of::<f32>() as u64
    }

    #[inline]
    pub(crate) const fn mask(self) -> u32 {
        1 << self.slot()
    }
}

/// Handle types of a graphics backend.
pub trait GraphicsApi {
    /// A linked vertex + fragment program.
    type Program;
    /// A static vertex buffer.
    type Buffer;
    /// Where a program reads its transform from.
    type Uniform;
}

/// One-time resource creation.
///
/// Called before the frame loop starts; nothing created here is mutated afterwards.
pub trait ResourceFactory {
    type Api: GraphicsApi;

    fn compile(&mut self, source: &ShaderSource<'_>) -> Result<<Self::Api as GraphicsApi>::Program>;

    /// Resolves a uniform of `program` by name.
    fn uniform(
        &mut self,
        program: &<Self::Api as GraphicsApi>::Program,
        name: &str,
    ) -> Result<<Self::Api as GraphicsApi>::Uniform>;

    /// Allocates a buffer and uploads `data` into it once.
    fn upload_vertices(
        &mut self,
        label: &str,
        data: &[[f32; 3]],
    ) -> Result<<Self::Api as GraphicsApi>::Buffer>;
}

/// Stateful command stream of a frame being recorded.
///
/// Mirrors classic bind-then-draw state: whatever a call binds stays bound until it
/// is replaced or disabled, and callers must not rely on state left by others.
pub trait DrawCommands<A: GraphicsApi> {
    fn use_program(&mut self, program: &A::Program);

    fn upload_transform(&mut self, uniform: &A::Uniform, transform: &TransformUniform);

    fn bind_attribute(&mut self, attribute: Attribute, buffer: &A::Buffer);

    /// Draws `vertex_count` vertices as a triangle list. Zero is a no-op.
    fn draw_triangles(&mut self, vertex_count: u32);

    fn disable_attribute(&mut self, attribute: Attribute);
}
