use bytemuck::{Pod, Zeroable};
use glam::DMat4;

/// Combined projection × view × model matrix.
///
/// Kept in `f64` while it is being composed; narrowed to `f32` only when uploaded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(pub DMat4);

impl Transform {
    pub const IDENTITY: Self = Self(DMat4::IDENTITY);

    #[inline]
    pub fn matrix(&self) -> DMat4 {
        self.0
    }

    /// Column-major `f32` layout matching a WGSL `mat4x4<f32>` uniform.
    #[inline]
    pub fn to_uniform(&self) -> TransformUniform {
        TransformUniform {
            columns: self.0.as_mat4().to_cols_array_2d(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub columns: [[f32; 4]; 4],
}

impl TransformUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}
