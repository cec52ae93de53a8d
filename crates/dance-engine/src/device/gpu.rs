use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::WgpuFactory;

use super::GpuInit;
use super::surface::{self, SurfaceErrorAction};

/// A swapchain image acquired for one frame, with the encoder recording into it.
///
/// Hand it back through [`Gpu::submit`] promptly; the next image cannot be acquired
/// while this one is held.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    /// View of the swapchain image; the resolve target when multisampling.
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// The graphics context of the animation window.
///
/// Holds the device, its queue, the configured surface and the multisampled color
/// target. `'w` ties the surface to the window it presents to.
pub struct Gpu<'w> {
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Last size reported by the window; may be 0x0 while minimized.
    size: PhysicalSize<u32>,
    sample_count: u32,
    msaa_view: Option<wgpu::TextureView>,
}

impl<'w> Gpu<'w> {
    /// Acquires an adapter and device for `window` and configures its surface.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = request_device(&adapter, &init).await?;
        let config = surface_config(&surface, &adapter, &init, size)?;
        surface.configure(&device, &config);

        let flags = surface::device_format_flags(
            config.format,
            device.features(),
            adapter.get_texture_format_features(config.format).flags,
        );
        let sample_count = surface::choose_sample_count(flags, init.sample_count);
        if sample_count != init.sample_count {
            log::warn!(
                "{}x MSAA unsupported for {:?}; using {sample_count}x",
                init.sample_count,
                config.format
            );
        }
        let msaa_view = surface::create_msaa_view(&device, &config, sample_count);

        log::info!(
            "surface: {}x{} {:?}, {:?}, {sample_count}x MSAA",
            config.width,
            config.height,
            config.format,
            config.present_mode
        );

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
            sample_count,
            msaa_view,
        })
    }

    /// Effective MSAA sample count; 1 when multisampling is off.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Multisampled color target to render into, when MSAA is on.
    pub fn msaa_view(&self) -> Option<&wgpu::TextureView> {
        self.msaa_view.as_ref()
    }

    /// Factory for pipelines and buffers that match this surface.
    pub fn resource_factory(&self) -> WgpuFactory<'_> {
        WgpuFactory::new(&self.device, self.config.format, self.sample_count)
    }

    /// Follows a window resize. The MSAA target is recreated at the new size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let reconfigured = surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
        if reconfigured {
            self.msaa_view = surface::create_msaa_view(&self.device, &self.config, self.sample_count);
            log::debug!("surface resized to {}x{}", new_size.width, new_size.height);
        }
    }

    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("dance frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents it.
    ///
    /// Under FIFO presentation this blocks until a swapchain slot frees up, which is
    /// what paces the loop.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }
}

/// Also enables adapter-specific format features when offered, so MSAA counts beyond
/// the guaranteed 4x stay usable.
async fn request_device(adapter: &wgpu::Adapter, init: &GpuInit) -> Result<(wgpu::Device, wgpu::Queue)> {
    let adapter_specific = wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES;
    let required_features = init.required_features | (adapter.features() & adapter_specific);

    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("dance device"),
            required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")
}

fn surface_config(
    surface: &wgpu::Surface<'_>,
    adapter: &wgpu::Adapter,
    init: &GpuInit,
    size: PhysicalSize<u32>,
) -> Result<wgpu::SurfaceConfiguration> {
    let caps = surface.get_capabilities(adapter);
    let format = surface::choose_surface_format(&caps, init.prefer_srgb)
        .context("surface reports no supported formats")?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width,
        height: size.height,
        present_mode: init.present_mode,
        alpha_mode: surface::choose_alpha_mode(&caps, init.alpha_mode),
        view_formats: vec![],
        desired_maximum_frame_latency: init.desired_maximum_frame_latency,
    })
}
