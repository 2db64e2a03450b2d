/// The surface texture acquired for the current frame.
///
/// Holding the surface texture prevents acquisition of subsequent frames;
/// it is consumed by [`Gpu::present`](super::Gpu::present) after submission.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}
