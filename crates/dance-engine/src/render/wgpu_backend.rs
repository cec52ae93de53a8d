use wgpu::util::DeviceExt;

use crate::camera::TransformUniform;
use crate::error::{GraphicsError, Result};

use super::api::{Attribute, DrawCommands, GraphicsApi, ResourceFactory};
use super::shader::{FRAGMENT_ENTRY, ProgramReflection, ShaderSource, VERTEX_ENTRY};

// ── blend ─────────────────────────────────────────────────────────────────

/// `dst = src + dst` on every channel. Overlapping triangles sum their colors and the
/// target format clamps the result.
pub(crate) fn additive_blend() -> wgpu::BlendState {
    let add = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: add,
        alpha: add,
    }
}

// ── vertex layouts ────────────────────────────────────────────────────────

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

fn vertex_layout(attribute: Attribute) -> wgpu::VertexBufferLayout<'static> {
    let attributes: &'static [wgpu::VertexAttribute] = match attribute {
        Attribute::Position => &POSITION_ATTRS,
        Attribute::Color => &COLOR_ATTRS,
    };
    wgpu::VertexBufferLayout {
        array_stride: attribute.stride(),
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

// ── handles ───────────────────────────────────────────────────────────────

/// wgpu flavor of the graphics seam.
pub struct WgpuApi;

/// Render pipeline built from one vertex + fragment pair.
pub struct WgpuProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    reflection: ProgramReflection,
}

impl WgpuProgram {
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Per-program uniform buffer holding the transform, plus its bind group.
pub struct WgpuTransformBinding {
    group: u32,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GraphicsApi for WgpuApi {
    type Program = WgpuProgram;
    type Buffer = wgpu::Buffer;
    type Uniform = WgpuTransformBinding;
}

// ── resource creation ─────────────────────────────────────────────────────

/// Creates programs and buffers on a device for a given color target.
pub struct WgpuFactory<'a> {
    device: &'a wgpu::Device,
    target_format: wgpu::TextureFormat,
    sample_count: u32,
}

impl<'a> WgpuFactory<'a> {
    pub fn new(device: &'a wgpu::Device, target_format: wgpu::TextureFormat, sample_count: u32) -> Self {
        Self {
            device,
            target_format,
            sample_count,
        }
    }
}

impl ResourceFactory for WgpuFactory<'_> {
    type Api = WgpuApi;

    fn compile(&mut self, source: &ShaderSource<'_>) -> Result<WgpuProgram> {
        // Validate up front; wgpu would otherwise report a broken module through the
        // uncaptured-error handler instead of a return value.
        let reflection = ProgramReflection::from_source(source)?;

        let vs_label = format!("dance {} vs", source.label);
        let vs = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&vs_label),
            source: wgpu::ShaderSource::Wgsl(source.vertex.into()),
        });

        let fs_label = format!("dance {} fs", source.label);
        let fs = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&fs_label),
            source: wgpu::ShaderSource::Wgsl(source.fragment.into()),
        });

        let pipeline_label = format!("dance {} pipeline", source.label);
        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&pipeline_label),
            // Derived from the shaders; bind group layouts are read back per uniform.
            layout: None,

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[
                    vertex_layout(Attribute::Position),
                    vertex_layout(Attribute::Color),
                ],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.target_format,
                    blend: Some(additive_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The camera passes behind every triangle; both faces must show.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            // No depth test: every fragment reaches the blender.
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: self.sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },

            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "compiled program `{}` (uniforms: {})",
            source.label,
            reflection.uniform_names().collect::<Vec<_>>().join(", ")
        );

        Ok(WgpuProgram {
            label: source.label.to_string(),
            pipeline,
            reflection,
        })
    }

    fn uniform(&mut self, program: &WgpuProgram, name: &str) -> Result<WgpuTransformBinding> {
        let slot = program
            .reflection
            .uniform(name)
            .ok_or_else(|| GraphicsError::UniformNotFound {
                program: program.label.clone(),
                name: name.to_string(),
            })?;

        let ubo_label = format!("dance {} {name} ubo", program.label);
        let ubo = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&ubo_label),
            size: TransformUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout = program.pipeline.get_bind_group_layout(slot.group);
        let bg_label = format!("dance {} {name} bind group", program.label);
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&bg_label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: slot.binding,
                resource: ubo.as_entire_binding(),
            }],
        });

        Ok(WgpuTransformBinding {
            group: slot.group,
            ubo,
            bind_group,
        })
    }

    fn upload_vertices(&mut self, label: &str, data: &[[f32; 3]]) -> Result<wgpu::Buffer> {
        let label = format!("dance {label} vbo");
        Ok(self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        }))
    }
}

// ── frame recording ───────────────────────────────────────────────────────

/// Records draw commands into an open render pass.
///
/// wgpu has no per-slot enable switch; the enabled set is tracked here so that a
/// draw with a stream left over from another renderable is caught in debug builds.
pub struct WgpuCommands<'p> {
    pass: wgpu::RenderPass<'p>,
    queue: &'p wgpu::Queue,
    enabled: u32,
}

impl<'p> WgpuCommands<'p> {
    pub fn new(pass: wgpu::RenderPass<'p>, queue: &'p wgpu::Queue) -> Self {
        Self {
            pass,
            queue,
            enabled: 0,
        }
    }
}

impl DrawCommands<WgpuApi> for WgpuCommands<'_> {
    fn use_program(&mut self, program: &WgpuProgram) {
        self.pass.set_pipeline(&program.pipeline);
    }

    fn upload_transform(&mut self, uniform: &WgpuTransformBinding, transform: &TransformUniform) {
        // Staged on the queue and applied before this frame's submission executes.
        self.queue
            .write_buffer(&uniform.ubo, 0, bytemuck::bytes_of(transform));
        self.pass.set_bind_group(uniform.group, &uniform.bind_group, &[]);
    }

    fn bind_attribute(&mut self, attribute: Attribute, buffer: &wgpu::Buffer) {
        self.enabled |= attribute.mask();
        // Empty slices are rejected by wgpu; an empty mesh never draws anyway.
        if buffer.size() > 0 {
            self.pass.set_vertex_buffer(attribute.slot(), buffer.slice(..));
        }
    }

    fn draw_triangles(&mut self, vertex_count: u32) {
        debug_assert!(
            Attribute::ALL.iter().all(|a| self.enabled & a.mask() != 0),
            "draw with an attribute stream disabled"
        );
        if vertex_count > 0 {
            self.pass.draw(0..vertex_count, 0..1);
        }
    }

    fn disable_attribute(&mut self, attribute: Attribute) {
        self.enabled &= !attribute.mask();
    }
}
