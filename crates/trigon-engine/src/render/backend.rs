use anyhow::Result;
use wgpu::util::DeviceExt;

use crate::device::{Gpu, GpuFrame};

use super::commands::CommandSequence;
use super::pipeline::PipelineDesc;
use super::shaders::ShaderSource;

/// The operations the frame renderer needs from a GPU device.
///
/// [`Gpu`] implements this over wgpu. Each method corresponds to one step of
/// building and submitting a frame; none of them retry.
pub trait RenderBackend {
    type Shader;
    type Pipeline;
    type Buffer;
    type Frame;

    /// Format of the color target passes render into.
    fn surface_format(&self) -> wgpu::TextureFormat;

    fn compile_shader(&self, source: &ShaderSource) -> Result<Self::Shader>;

    fn create_pipeline(&self, desc: &PipelineDesc<'_, Self::Shader>) -> Result<Self::Pipeline>;

    /// Creates a vertex buffer initialized with `contents`.
    fn create_vertex_buffer(&self, label: &str, contents: &[u8]) -> Result<Self::Buffer>;

    /// Acquires the surface's current frame.
    fn acquire_frame(&self) -> Result<Self::Frame>;

    /// Submits `commands` against `frame` without waiting for completion.
    fn submit(
        &self,
        frame: Self::Frame,
        commands: CommandSequence<'_, Self::Pipeline, Self::Buffer>,
    ) -> Result<()>;
}

impl RenderBackend for Gpu {
    type Shader = wgpu::ShaderModule;
    type Pipeline = wgpu::RenderPipeline;
    type Buffer = wgpu::Buffer;
    type Frame = GpuFrame;

    fn surface_format(&self) -> wgpu::TextureFormat {
        Gpu::surface_format(self)
    }

    fn compile_shader(&self, source: &ShaderSource) -> Result<wgpu::ShaderModule> {
        Ok(self.device().create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.label),
            source: wgpu::ShaderSource::Wgsl(source.wgsl.clone()),
        }))
    }

    fn create_pipeline(
        &self,
        desc: &PipelineDesc<'_, wgpu::ShaderModule>,
    ) -> Result<wgpu::RenderPipeline> {
        let device = self.device();

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: desc.vertex.module,
                entry_point: Some(desc.vertex.entry_point),
                compilation_options: Default::default(),
                buffers: std::slice::from_ref(&desc.vertex_layout),
            },

            fragment: Some(wgpu::FragmentState {
                module: desc.fragment.module,
                entry_point: Some(desc.fragment.entry_point),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: desc.primitive,
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        }))
    }

    fn create_vertex_buffer(&self, label: &str, contents: &[u8]) -> Result<wgpu::Buffer> {
        Ok(self
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            }))
    }

    fn acquire_frame(&self) -> Result<GpuFrame> {
        self.current_frame()
    }

    fn submit(
        &self,
        frame: GpuFrame,
        commands: CommandSequence<'_, wgpu::RenderPipeline, wgpu::Buffer>,
    ) -> Result<()> {
        let mut encoder = self
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some(commands.label),
            });

        commands.encode(&mut encoder, &frame.view);
        self.queue().submit(std::iter::once(encoder.finish()));
        self.present(frame);

        Ok(())
    }
}
