/// Initialization parameters for the GPU layer.
///
/// Defaults mirror a plain WebGPU setup: any backend, a BGRA8 color target
/// and FIFO presentation.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick an adapter from.
    pub backends: wgpu::Backends,

    /// Adapter selection hint.
    pub power_preference: wgpu::PowerPreference,

    /// Color target format used when the surface supports it.
    ///
    /// Falls back to the surface's first reported format otherwise.
    pub preferred_format: wgpu::TextureFormat,

    /// Present mode (swap behavior).
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::default(),
            preferred_format: wgpu::TextureFormat::Bgra8Unorm,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: default_limits(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_limits() -> wgpu::Limits {
    wgpu::Limits::default()
}

// Browsers without WebGPU fall back to WebGL2, which cannot satisfy the full limits.
#[cfg(target_arch = "wasm32")]
fn default_limits() -> wgpu::Limits {
    wgpu::Limits::downlevel_webgl2_defaults()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plain_webgpu_setup() {
        let init = GpuInit::default();
        assert_eq!(init.preferred_format, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert!(init.required_features.is_empty());
        assert!(init.alpha_mode.is_none());
    }
}
