//! WGSL program sources, validation and uniform reflection.
//!
//! Sources are parsed and validated with naga before any GPU object is created, so a
//! broken shader fails with a readable diagnostic instead of a device error later.

use crate::error::{GraphicsError, Result, ShaderStage};

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// A vertex + fragment source pair forming one program.
#[derive(Debug, Copy, Clone)]
pub struct ShaderSource<'a> {
    pub label: &'a str,
    pub vertex: &'a str,
    pub fragment: &'a str,
}

/// `@group` / `@binding` of a uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformSlot {
    pub group: u32,
    pub binding: u32,
}

/// Uniforms declared by a validated program, by name.
#[derive(Debug, Clone, Default)]
pub struct ProgramReflection {
    uniforms: Vec<(String, UniformSlot)>,
}

impl ProgramReflection {
    /// Parses and validates both stages and collects their uniforms.
    pub fn from_source(source: &ShaderSource<'_>) -> Result<Self> {
        let vertex = compile_stage(source.label, ShaderStage::Vertex, source.vertex)?;
        let fragment = compile_stage(source.label, ShaderStage::Fragment, source.fragment)?;

        let mut uniforms: Vec<(String, UniformSlot)> = Vec::new();
        for (name, slot) in uniforms_of(&vertex).chain(uniforms_of(&fragment)) {
            if !uniforms.iter().any(|(n, _)| *n == name) {
                uniforms.push((name, slot));
            }
        }

        Ok(Self { uniforms })
    }

    pub fn uniform(&self, name: &str) -> Option<UniformSlot> {
        self.uniforms
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, slot)| *slot)
    }

    pub fn uniform_names(&self) -> impl Iterator<Item = &str> {
        self.uniforms.iter().map(|(n, _)| n.as_str())
    }
}

fn compile_stage(label: &str, stage: ShaderStage, src: &str) -> Result<naga::Module> {
    let fail = |message: String| GraphicsError::ShaderCompile {
        stage,
        label: label.to_string(),
        message,
    };

    let module = naga::front::wgsl::parse_str(src).map_err(|e| fail(e.emit_to_string(src)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| fail(e.emit_to_string(src)))?;

    let (naga_stage, entry) = match stage {
        ShaderStage::Vertex => (naga::ShaderStage::Vertex, VERTEX_ENTRY),
        ShaderStage::Fragment => (naga::ShaderStage::Fragment, FRAGMENT_ENTRY),
    };
    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.stage == naga_stage && ep.name == entry);
    if !has_entry {
        return Err(fail(format!("missing @{stage} entry point `{entry}`")));
    }

    Ok(module)
}

fn uniforms_of(module: &naga::Module) -> impl Iterator<Item = (String, UniformSlot)> + '_ {
    module.global_variables.iter().filter_map(|(_, var)| {
        if var.space != naga::AddressSpace::Uniform {
            return None;
        }
        let binding = var.binding.as_ref()?;
        let name = var.name.clone()?;
        Some((
            name,
            UniformSlot {
                group: binding.group,
                binding: binding.binding,
            },
        ))
    })
}
