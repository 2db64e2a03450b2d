use anyhow::{Context, Result};

use super::surface::{choose_alpha_mode, choose_surface_format};
use super::{GpuFrame, GpuInit, SurfaceHandle};

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the low-level rendering context:
/// - creates Instance/Adapter, stores Device/Queue
/// - creates and configures the Surface bound to a [`SurfaceHandle`]
/// - acquires the current frame and presents it after submission
pub struct Gpu {
    /// Kept alive for the lifetime of the surface.
    _instance: wgpu::Instance,

    surface: wgpu::Surface<'static>,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    /// Creates a GPU context bound to `handle`.
    ///
    /// Adapter and device acquisition are asynchronous; the caller is suspended
    /// until the driver answers. There is no timeout.
    pub async fn new(handle: SurfaceHandle, init: GpuInit) -> Result<Self> {
        let (width, height) = handle.size();
        anyhow::ensure!(width > 0 && height > 0, "surface has zero size");
        log::debug!("surface handle: {handle:?} ({width}x{height})");

        let GpuInit {
            backends,
            power_preference,
            preferred_format,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(handle.into_target())
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        log::info!("adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trigon device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;
        log::debug!("device: {device:?}");

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats, preferred_format)
            .context("surface reports no supported formats")?;
        let alpha_mode = choose_alpha_mode(&caps.alpha_modes, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::debug!("surface configured: {format:?}, {alpha_mode:?}, {present_mode:?}");

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Acquires the surface's current texture and a view onto it.
    pub fn current_frame(&self) -> Result<GpuFrame> {
        let surface_texture = self
            .surface
            .get_current_texture()
            .context("failed to acquire the surface's current texture")?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Ok(GpuFrame {
            surface_texture,
            view,
        })
    }

    /// Presents a frame whose commands have already been submitted.
    pub fn present(&self, frame: GpuFrame) {
        drop(frame.view);
        frame.surface_texture.present();
    }
}
