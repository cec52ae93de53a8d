use winit::dpi::PhysicalSize;

/// What the frame should do after acquiring the swapchain image failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was lost or outdated and has been configured again.
    Reconfigured,
    /// Acquisition timed out; try again next frame.
    SkipFrame,
    /// Out of memory. The loop cannot continue.
    Fatal,
}

/// Picks the first format matching the sRGB preference, else the first format.
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| caps.formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Format features the device validates attachments against.
///
/// Without `TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES` wgpu checks only the
/// WebGPU-guaranteed set, whatever the adapter reports.
pub(crate) fn device_format_flags(
    format: wgpu::TextureFormat,
    device_features: wgpu::Features,
    adapter_flags: wgpu::TextureFormatFeatureFlags,
) -> wgpu::TextureFormatFeatureFlags {
    if device_features.contains(wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES) {
        adapter_flags
    } else {
        format.guaranteed_format_features(device_features).flags
    }
}

/// Largest supported count not above `requested`; 1 is always supported.
///
/// Multisampling needs a resolve into the swapchain image, so formats without
/// `MULTISAMPLE_RESOLVE` get 1.
pub(crate) fn choose_sample_count(
    flags: wgpu::TextureFormatFeatureFlags,
    requested: u32,
) -> u32 {
    if !flags.contains(wgpu::TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE) {
        return 1;
    }
    [16, 8, 4, 2]
        .into_iter()
        .filter(|&n| n <= requested)
        .find(|&n| flags.sample_count_supported(n))
        .unwrap_or(1)
}

pub(crate) fn create_msaa_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    sample_count: u32,
) -> Option<wgpu::TextureView> {
    if sample_count <= 1 {
        return None;
    }

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("dance msaa color"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format: config.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
}

/// Returns `true` when the surface was reconfigured.
///
/// wgpu does not support configuring a surface with a 0x0 size (minimized window);
/// in that case only `size` is updated and configuration is deferred.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) -> bool {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;

    surface.configure(device, config);
    true
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{TextureFormat, TextureFormatFeatureFlags as Flags};

    fn caps(formats: &[TextureFormat]) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats: formats.to_vec(),
            ..Default::default()
        }
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn linear_format_preferred_when_srgb_off() {
        let c = caps(&[TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm]);
        assert_eq!(choose_surface_format(&c, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn srgb_format_preferred_when_srgb_on() {
        let c = caps(&[TextureFormat::Rgba8Unorm, TextureFormat::Rgba8UnormSrgb]);
        assert_eq!(choose_surface_format(&c, true), Some(TextureFormat::Rgba8UnormSrgb));
    }

    #[test]
    fn falls_back_to_first_format() {
        let c = caps(&[TextureFormat::Bgra8UnormSrgb]);
        assert_eq!(choose_surface_format(&c, false), Some(TextureFormat::Bgra8UnormSrgb));
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&caps(&[]), false), None);
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn unsupported_alpha_request_falls_back() {
        let c = wgpu::SurfaceCapabilities {
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            ..Default::default()
        };
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
    }

    // ── sample count ──────────────────────────────────────────────────────

    const RESOLVE: Flags = Flags::MULTISAMPLE_RESOLVE;

    #[test]
    fn requested_count_kept_when_supported() {
        let flags = Flags::MULTISAMPLE_X2 | Flags::MULTISAMPLE_X4 | RESOLVE;
        assert_eq!(choose_sample_count(flags, 4), 4);
    }

    #[test]
    fn steps_down_to_supported_count() {
        assert_eq!(choose_sample_count(Flags::MULTISAMPLE_X2 | RESOLVE, 4), 2);
    }

    #[test]
    fn single_sample_when_nothing_supported() {
        assert_eq!(choose_sample_count(Flags::empty(), 4), 1);
        assert_eq!(choose_sample_count(Flags::MULTISAMPLE_X4 | RESOLVE, 1), 1);
    }

    #[test]
    fn single_sample_without_resolve() {
        assert_eq!(choose_sample_count(Flags::MULTISAMPLE_X4, 4), 1);
    }

    #[test]
    fn adapter_counts_ignored_without_adapter_specific_features() {
        let adapter = Flags::MULTISAMPLE_X2 | Flags::MULTISAMPLE_X4 | Flags::MULTISAMPLE_X8 | RESOLVE;
        let format = TextureFormat::Bgra8Unorm;
        let flags = device_format_flags(format, wgpu::Features::empty(), adapter);

        for requested in [2, 4, 8, 16] {
            let chosen = choose_sample_count(flags, requested);
            assert!(
                chosen == 1 || flags.sample_count_supported(chosen),
                "device rejects {chosen}x for {requested}x requested"
            );
        }
        assert_eq!(choose_sample_count(flags, 8), 4);
        assert_eq!(choose_sample_count(flags, 2), 1);
    }

    #[test]
    fn adapter_counts_used_with_adapter_specific_features() {
        let adapter = Flags::MULTISAMPLE_X2 | Flags::MULTISAMPLE_X4 | Flags::MULTISAMPLE_X8 | RESOLVE;
        let features = wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES;
        let flags = device_format_flags(TextureFormat::Bgra8Unorm, features, adapter);

        assert_eq!(choose_sample_count(flags, 8), 8);
        assert_eq!(choose_sample_count(flags, 2), 2);
    }
}
