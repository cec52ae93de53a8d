use crate::error::{GraphicsError, Result};

use super::api::{GraphicsApi, ResourceFactory};
use super::shader::ShaderSource;

/// Name of the transform uniform every program must declare.
pub const TRANSFORM_UNIFORM: &str = "mvp";

/// Authoring-side description of one mesh: its program and raw vertex data.
#[derive(Debug, Copy, Clone)]
pub struct MeshDesc<'a> {
    pub label: &'a str,
    pub shader: ShaderSource<'a>,
    /// Triangle list; three consecutive positions form one triangle.
    pub positions: &'a [[f32; 3]],
    /// One RGB triple per position.
    pub colors: &'a [[f32; 3]],
}

impl MeshDesc<'_> {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Vertex count as drawn, once the arrays are known to form whole triangles.
    fn checked_draw_count(&self) -> Result<u32> {
        draw_count(self.label, self.positions.len(), self.colors.len())
    }
}

fn draw_count(label: &str, positions: usize, colors: usize) -> Result<u32> {
    let layout_error = || GraphicsError::MeshLayout {
        label: label.to_string(),
        positions,
        colors,
    };
    if positions != colors || positions % 3 != 0 {
        return Err(layout_error());
    }
    u32::try_from(positions).map_err(|_| layout_error())
}

/// A self-contained drawable: program, transform binding, two static buffers.
///
/// Immutable once built.
pub struct Renderable<A: GraphicsApi> {
    label: String,
    program: A::Program,
    transform: A::Uniform,
    positions: A::Buffer,
    colors: A::Buffer,
    vertex_count: u32,
}

impl<A: GraphicsApi> Renderable<A> {
    /// Compiles the program, resolves its transform uniform and uploads both buffers.
    pub fn new<F>(factory: &mut F, mesh: &MeshDesc<'_>) -> Result<Self>
    where
        F: ResourceFactory<Api = A>,
    {
        let vertex_count = mesh.checked_draw_count()?;

        let program = factory.compile(&mesh.shader)?;
        let transform = factory.uniform(&program, TRANSFORM_UNIFORM)?;
        let positions = factory.upload_vertices(&format!("{} positions", mesh.label), mesh.positions)?;
        let colors = factory.upload_vertices(&format!("{} colors", mesh.label), mesh.colors)?;

        log::debug!(
            "mesh `{}` ready: {} vertices, program `{}`",
            mesh.label,
            mesh.vertex_count(),
            mesh.shader.label
        );

        Ok(Self {
            label: mesh.label.to_string(),
            program,
            transform,
            positions,
            colors,
            vertex_count,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn program(&self) -> &A::Program {
        &self.program
    }

    pub fn transform_uniform(&self) -> &A::Uniform {
        &self.transform
    }

    pub fn positions(&self) -> &A::Buffer {
        &self.positions
    }

    pub fn colors(&self) -> &A::Buffer {
        &self.colors
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// Ordered renderables drawn every frame.
///
/// Dropping a scene releases its renderables last-built first.
pub struct Scene<A: GraphicsApi> {
    renderables: Vec<Renderable<A>>,
}

impl<A: GraphicsApi> Scene<A> {
    pub fn new() -> Self {
        Self {
            renderables: Vec::new(),
        }
    }

    /// Builds one renderable per table entry, in table order.
    pub fn from_table<F>(factory: &mut F, meshes: &[MeshDesc<'_>]) -> Result<Self>
    where
        F: ResourceFactory<Api = A>,
    {
        let mut scene = Self::new();
        for mesh in meshes {
            scene.push(Renderable::new(factory, mesh)?);
        }
        Ok(scene)
    }

    pub fn push(&mut self, renderable: Renderable<A>) {
        self.renderables.push(renderable);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Renderable<A>> {
        self.renderables.iter()
    }

    pub fn len(&self) -> usize {
        self.renderables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderables.is_empty()
    }

    pub fn vertex_count(&self) -> u64 {
        self.renderables.iter().map(|r| r.vertex_count as u64).sum()
    }
}

impl<A: GraphicsApi> Default for Scene<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: GraphicsApi> Drop for Scene<A> {
    fn drop(&mut self) {
        while let Some(r) = self.renderables.pop() {
            log::debug!("released mesh `{}`", r.label);
        }
    }
}
