//! Headless stand-in for the GPU: records commands and tracks bound state.

use std::collections::BTreeSet;

use crate::camera::TransformUniform;
use crate::error::{GraphicsError, Result};

use super::api::{Attribute, DrawCommands, GraphicsApi, ResourceFactory};
use super::renderable::MeshDesc;
use super::shader::{ProgramReflection, ShaderSource, fixtures};

pub(crate) struct RecordingApi;

#[derive(Debug, Clone)]
pub(crate) struct RecordedProgram(pub u32, pub ProgramReflection);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedBuffer {
    pub id: u32,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedUniform {
    pub program: u32,
    pub name: String,
}

impl GraphicsApi for RecordingApi {
    type Program = RecordedProgram;
    type Buffer = RecordedBuffer;
    type Uniform = RecordedUniform;
}

#[derive(Default)]
pub(crate) struct RecordingFactory {
    next_id: u32,
    pub programs: usize,
    pub uploads: Vec<(String, usize)>,
}

impl RecordingFactory {
    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl ResourceFactory for RecordingFactory {
    type Api = RecordingApi;

    fn compile(&mut self, source: &ShaderSource<'_>) -> Result<RecordedProgram> {
        let reflection = ProgramReflection::from_source(source)?;
        self.programs += 1;
        Ok(RecordedProgram(self.id(), reflection))
    }

    fn uniform(&mut self, program: &RecordedProgram, name: &str) -> Result<RecordedUniform> {
        program
            .1
            .uniform(name)
            .map(|_| RecordedUniform {
                program: program.0,
                name: name.to_string(),
            })
            .ok_or_else(|| GraphicsError::UniformNotFound {
                program: program.0.to_string(),
                name: name.to_string(),
            })
    }

    fn upload_vertices(&mut self, label: &str, data: &[[f32; 3]]) -> Result<RecordedBuffer> {
        self.uploads.push((label.to_string(), data.len()));
        Ok(RecordedBuffer {
            id: self.id(),
            len: data.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    UseProgram(u32),
    UploadTransform { program: u32, columns: [[f32; 4]; 4] },
    BindAttribute { slot: u32, buffer: u32 },
    Draw { vertex_count: u32 },
    DisableAttribute { slot: u32 },
}

#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub commands: Vec<Command>,
    /// Enabled slots observed at each draw.
    pub enabled_at_draw: Vec<Vec<u32>>,
    enabled: BTreeSet<u32>,
}

impl Recorder {
    pub fn enabled_slots(&self) -> Vec<u32> {
        self.enabled.iter().copied().collect()
    }

    pub fn draw_calls(&self) -> Vec<u32> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Draw { vertex_count } => Some(*vertex_count),
                _ => None,
            })
            .collect()
    }
}

impl DrawCommands<RecordingApi> for Recorder {
    fn use_program(&mut self, program: &RecordedProgram) {
        self.commands.push(Command::UseProgram(program.0));
    }

    fn upload_transform(&mut self, uniform: &RecordedUniform, transform: &TransformUniform) {
        self.commands.push(Command::UploadTransform {
            program: uniform.program,
            columns: transform.columns,
        });
    }

    fn bind_attribute(&mut self, attribute: Attribute, buffer: &RecordedBuffer) {
        self.enabled.insert(attribute.slot());
        self.commands.push(Command::BindAttribute {
            slot: attribute.slot(),
            buffer: buffer.id,
        });
    }

    fn draw_triangles(&mut self, vertex_count: u32) {
        self.enabled_at_draw.push(self.enabled_slots());
        self.commands.push(Command::Draw { vertex_count });
    }

    fn disable_attribute(&mut self, attribute: Attribute) {
        self.enabled.remove(&attribute.slot());
        self.commands.push(Command::DisableAttribute {
            slot: attribute.slot(),
        });
    }
}

/// A mesh of `vertices` vertices using the fixture program.
pub(crate) fn test_mesh(label: &'static str, vertices: usize) -> MeshDesc<'static> {
    let positions: &'static [[f32; 3]] = (0..vertices)
        .map(|i| [i as f32, 0.0, 0.0])
        .collect::<Vec<_>>()
        .leak();
    let colors: &'static [[f32; 3]] = vec![[1.0, 0.0, 0.0]; vertices].leak();
    MeshDesc {
        label,
        shader: ShaderSource {
            label: "fixture",
            vertex: fixtures::VERTEX,
            fragment: fixtures::FRAGMENT,
        },
        positions,
        colors,
    }
}
