//! Mesh rendering.
//!
//! The frame loop talks to the GPU only through the traits in [`api`]: a
//! [`ResourceFactory`] builds [`Renderable`]s once, and [`dispatcher`] replays the
//! same bind-then-draw sequence for each of them every frame through
//! [`DrawCommands`]. [`wgpu_backend`] is the real implementation.
//!
//! Convention:
//! - positions are world space, transformed in the vertex shader by the `mvp` uniform
//! - blending is additive and there is no depth attachment

pub mod api;
mod color;
pub mod dispatcher;
mod renderable;
pub mod shader;
pub mod wgpu_backend;

#[cfg(test)]
pub(crate) mod recording;

pub use api::{Attribute, DrawCommands, GraphicsApi, ResourceFactory};
pub use color::Color;
pub use renderable::{MeshDesc, Renderable, Scene, TRANSFORM_UNIFORM};
pub use shader::{ProgramReflection, ShaderSource, UniformSlot};
pub use wgpu_backend::{WgpuApi, WgpuCommands, WgpuFactory};
