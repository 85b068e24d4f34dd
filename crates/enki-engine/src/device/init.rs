use winit::dpi::PhysicalSize;

/// Everything tunable about GPU bring-up.
///
/// The defaults suit a UI workload: sRGB output, FIFO presentation, no
/// extra features or limits. Fields are plain data so callers can build
/// one with struct update syntax off `Default`.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when the surface offers one.
    pub prefer_srgb: bool,

    /// Swapchain present mode. FIFO is universally supported and caps the
    /// frame rate at the display's refresh.
    pub present_mode: wgpu::PresentMode,

    /// Surface alpha compositing mode. `None` takes the surface's first
    /// supported mode; an unsupported request falls back the same way.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Features the device must provide. Keep empty unless a renderer
    /// genuinely needs one.
    pub required_features: wgpu::Features,

    /// Limits requested from the device.
    pub required_limits: wgpu::Limits,

    /// Hint for how many frames may be in flight.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        GpuInit {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    pub(crate) fn device_descriptor(&self) -> wgpu::DeviceDescriptor<'static> {
        wgpu::DeviceDescriptor {
            label: Some("enki device"),
            required_features: self.required_features,
            required_limits: self.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }
    }

    /// Resolves this request against what the surface actually supports.
    /// Returns `None` only when the surface reports no formats at all.
    pub(crate) fn surface_config(
        &self,
        caps: &wgpu::SurfaceCapabilities,
        size: PhysicalSize<u32>,
    ) -> Option<wgpu::SurfaceConfiguration> {
        let format = pick_format(&caps.formats, self.prefer_srgb)?;
        Some(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: self.present_mode,
            alpha_mode: pick_alpha(&caps.alpha_modes, self.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: self.desired_maximum_frame_latency,
        })
    }
}

/// Surface formats arrive ordered by preference, so take the first sRGB
/// entry when asked for sRGB, else the surface's own first choice.
fn pick_format(
    available: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let srgb = available.iter().copied().find(|f| {
            matches!(
                f,
                wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
            )
        });
        if srgb.is_some() {
            return srgb;
        }
    }
    available.first().copied()
}

fn pick_alpha(
    available: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    match requested {
        Some(mode) if available.contains(&mode) => mode,
        _ => available.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    #[test]
    fn srgb_preference_picks_first_srgb_entry() {
        let formats = [
            TextureFormat::Bgra8Unorm,
            TextureFormat::Rgba8UnormSrgb,
            TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(pick_format(&formats, true), Some(TextureFormat::Rgba8UnormSrgb));
    }

    #[test]
    fn without_srgb_preference_takes_surface_order() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(pick_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn srgb_preference_falls_back_when_unavailable() {
        let formats = [TextureFormat::Bgra8Unorm];
        assert_eq!(pick_format(&formats, true), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(pick_format(&[], true), None);
    }

    #[test]
    fn requested_alpha_mode_wins_when_supported() {
        let modes = [CompositeAlphaMode::Opaque, CompositeAlphaMode::PreMultiplied];
        let picked = pick_alpha(&modes, Some(CompositeAlphaMode::PreMultiplied));
        assert_eq!(picked, CompositeAlphaMode::PreMultiplied);
    }

    #[test]
    fn unsupported_request_falls_back_to_first_supported() {
        let modes = [CompositeAlphaMode::Opaque];
        let picked = pick_alpha(&modes, Some(CompositeAlphaMode::PostMultiplied));
        assert_eq!(picked, CompositeAlphaMode::Opaque);
    }

    #[test]
    fn empty_modes_fall_back_to_auto() {
        assert_eq!(pick_alpha(&[], None), CompositeAlphaMode::Auto);
    }
}
