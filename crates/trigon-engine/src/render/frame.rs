use anyhow::{Context, Result};

use crate::device::{Gpu, GpuInit, SurfaceHandle};

use super::backend::RenderBackend;
use super::commands::{CommandSequence, DrawCall, RenderPass};
use super::pipeline::{PipelineDesc, StageDesc};
use super::shaders::ShaderSource;
use super::vertex::{Vertex, TRIANGLE};

/// What the single frame contains.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Color the frame is cleared to before drawing.
    pub clear_color: wgpu::Color,
    /// Vertices drawn as one triangle list, one instance.
    pub vertices: Vec<Vertex>,
    pub vertex_shader: ShaderSource,
    pub fragment_shader: ShaderSource,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color::BLACK,
            vertices: TRIANGLE.to_vec(),
            vertex_shader: ShaderSource::triangle_vertex(),
            fragment_shader: ShaderSource::triangle_fragment(),
        }
    }
}

/// Builds the pipeline, records one pass with one draw, and submits it.
///
/// Every step runs once, in order; the first failure aborts the frame.
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    config: FrameConfig,
}

impl FrameRenderer {
    pub fn new(config: FrameConfig) -> Self {
        Self { config }
    }

    /// The draw issued for the configured vertices.
    pub fn draw_call(&self) -> Result<DrawCall> {
        let count = u32::try_from(self.config.vertices.len())
            .context("vertex count does not fit a draw call")?;
        Ok(DrawCall::new(count, 1))
    }

    pub fn render<B: RenderBackend>(&self, backend: &B) -> Result<()> {
        let config = &self.config;
        anyhow::ensure!(!config.vertices.is_empty(), "no vertices to draw");

        let vs_interface = config
            .vertex_shader
            .reflect()
            .context("vertex shader rejected")?;
        let fs_interface = config
            .fragment_shader
            .reflect()
            .context("fragment shader rejected")?;
        log::debug!("vertex stage interface: {vs_interface:?}");
        log::debug!("fragment stage interface: {fs_interface:?}");

        let vs = backend
            .compile_shader(&config.vertex_shader)
            .context("failed to compile vertex shader")?;
        let fs = backend
            .compile_shader(&config.fragment_shader)
            .context("failed to compile fragment shader")?;

        let desc = PipelineDesc::triangle(
            StageDesc {
                module: &vs,
                entry_point: config.vertex_shader.entry_point,
            },
            StageDesc {
                module: &fs,
                entry_point: config.fragment_shader.entry_point,
            },
            backend.surface_format(),
        );
        let pipeline = backend
            .create_pipeline(&desc)
            .context("failed to create render pipeline")?;
        log::debug!(
            "pipeline `{}`: {:?} into {:?}",
            desc.label,
            desc.primitive.topology,
            desc.target_format
        );

        let vertex_buffer = backend
            .create_vertex_buffer(
                "trigon triangle vbo",
                bytemuck::cast_slice(&config.vertices),
            )
            .context("failed to create vertex buffer")?;

        let frame = backend
            .acquire_frame()
            .context("failed to acquire frame")?;

        let draw = self.draw_call()?;
        let mut commands = CommandSequence::new("trigon frame encoder");
        commands.push(
            RenderPass::new("trigon triangle pass", config.clear_color)
                .set_pipeline(&pipeline)
                .set_vertex_buffer(0, &vertex_buffer)
                .draw(draw),
        );

        log::info!(
            "submitting {} pass(es), draws {:?}",
            commands.passes.len(),
            commands.draw_calls().collect::<Vec<_>>()
        );
        backend
            .submit(frame, commands)
            .context("failed to submit frame")?;

        Ok(())
    }
}

/// Acquires a device for `surface` and renders the configured frame once.
///
/// Returns the [`Gpu`] so the host decides how long the device outlives the frame.
pub async fn run(surface: SurfaceHandle, init: GpuInit, config: FrameConfig) -> Result<Gpu> {
    let gpu = Gpu::new(surface, init).await?;
    FrameRenderer::new(config).render(&gpu)?;
    Ok(gpu)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use anyhow::bail;

    use super::*;
    use crate::render::commands::PassCommand;
    use crate::render::shaders::Stage;

    #[derive(Debug, Clone, PartialEq)]
    enum Recorded {
        SetPipeline(String),
        SetVertexBuffer { slot: u32, label: String, len: usize },
        Draw(DrawCall),
    }

    #[derive(Debug)]
    struct RecordedPass {
        clear: wgpu::Color,
        commands: Vec<Recorded>,
    }

    #[derive(Debug)]
    struct Submission {
        frame: u32,
        passes: Vec<RecordedPass>,
    }

    #[derive(Debug)]
    struct PipelineRecord {
        label: String,
        vertex: (String, Stage),
        fragment: (String, Stage),
        vertex_layout: wgpu::VertexBufferLayout<'static>,
        target_format: wgpu::TextureFormat,
        primitive: wgpu::PrimitiveState,
    }

    #[derive(Debug)]
    struct BufferRecord {
        label: String,
        len: usize,
    }

    #[derive(Default)]
    struct RecordingBackend {
        fail_pipeline: bool,
        pipelines: RefCell<Vec<String>>,
        frames_acquired: Cell<u32>,
        submissions: RefCell<Vec<Submission>>,
    }

    impl RenderBackend for RecordingBackend {
        type Shader = (String, Stage);
        type Pipeline = PipelineRecord;
        type Buffer = BufferRecord;
        type Frame = u32;

        fn surface_format(&self) -> wgpu::TextureFormat {
            wgpu::TextureFormat::Bgra8Unorm
        }

        fn compile_shader(&self, source: &ShaderSource) -> Result<Self::Shader> {
            Ok((source.label.to_string(), source.stage))
        }

        fn create_pipeline(&self, desc: &PipelineDesc<'_, Self::Shader>) -> Result<PipelineRecord> {
            if self.fail_pipeline {
                bail!("pipeline creation refused");
            }
            self.pipelines.borrow_mut().push(desc.label.to_string());
            Ok(PipelineRecord {
                label: desc.label.to_string(),
                vertex: desc.vertex.module.clone(),
                fragment: desc.fragment.module.clone(),
                vertex_layout: desc.vertex_layout.clone(),
                target_format: desc.target_format,
                primitive: desc.primitive,
            })
        }

        fn create_vertex_buffer(&self, label: &str, contents: &[u8]) -> Result<BufferRecord> {
            Ok(BufferRecord {
                label: label.to_string(),
                len: contents.len(),
            })
        }

        fn acquire_frame(&self) -> Result<u32> {
            let frame = self.frames_acquired.get();
            self.frames_acquired.set(frame + 1);
            Ok(frame)
        }

        fn submit(
            &self,
            frame: u32,
            commands: CommandSequence<'_, PipelineRecord, BufferRecord>,
        ) -> Result<()> {
            let passes = commands
                .passes
                .iter()
                .map(|pass| RecordedPass {
                    clear: pass.clear,
                    commands: pass
                        .commands
                        .iter()
                        .map(|cmd| match cmd {
                            PassCommand::SetPipeline(p) => Recorded::SetPipeline(p.label.clone()),
                            PassCommand::SetVertexBuffer { slot, buffer } => {
                                Recorded::SetVertexBuffer {
                                    slot: *slot,
                                    label: buffer.label.clone(),
                                    len: buffer.len,
                                }
                            }
                            PassCommand::Draw(call) => Recorded::Draw(*call),
                        })
                        .collect(),
                })
                .collect();

            self.submissions
                .borrow_mut()
                .push(Submission { frame, passes });
            Ok(())
        }
    }

    #[test]
    fn one_sequence_one_pass_one_draw() {
        let backend = RecordingBackend::default();
        FrameRenderer::default().render(&backend).unwrap();

        let submissions = backend.submissions.borrow();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].frame, 0);
        assert_eq!(submissions[0].passes.len(), 1);

        let pass = &submissions[0].passes[0];
        assert_eq!(pass.clear, wgpu::Color::BLACK);

        let draws: Vec<_> = pass
            .commands
            .iter()
            .filter_map(|c| match c {
                Recorded::Draw(call) => Some(*call),
                _ => None,
            })
            .collect();
        assert_eq!(
            draws,
            vec![DrawCall {
                vertex_count: 3,
                instance_count: 1,
                first_vertex: 0,
                first_instance: 0,
            }]
        );
    }

    #[test]
    fn pass_binds_pipeline_then_buffer_then_draws() {
        let backend = RecordingBackend::default();
        FrameRenderer::default().render(&backend).unwrap();

        let submissions = backend.submissions.borrow();
        assert_eq!(
            submissions[0].passes[0].commands,
            vec![
                Recorded::SetPipeline("trigon triangle pipeline".to_string()),
                Recorded::SetVertexBuffer {
                    slot: 0,
                    label: "trigon triangle vbo".to_string(),
                    len: 24,
                },
                Recorded::Draw(DrawCall::new(3, 1)),
            ]
        );
    }

    #[test]
    fn pipeline_combines_both_stages() {
        let backend = RecordingBackend::default();
        let config = FrameConfig::default();

        let vs = backend.compile_shader(&config.vertex_shader).unwrap();
        let fs = backend.compile_shader(&config.fragment_shader).unwrap();
        let desc = PipelineDesc::triangle(
            StageDesc {
                module: &vs,
                entry_point: "main",
            },
            StageDesc {
                module: &fs,
                entry_point: "main",
            },
            backend.surface_format(),
        );
        let pipeline = backend.create_pipeline(&desc).unwrap();

        assert_eq!(pipeline.vertex.1, Stage::Vertex);
        assert_eq!(pipeline.fragment.1, Stage::Fragment);
        assert_eq!(pipeline.vertex_layout.array_stride, 8);
        assert_eq!(pipeline.target_format, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(pipeline.primitive.cull_mode, None);
    }

    #[test]
    fn pipeline_failure_aborts_before_submission() {
        let backend = RecordingBackend {
            fail_pipeline: true,
            ..Default::default()
        };
        let err = FrameRenderer::default().render(&backend).unwrap_err();

        assert!(format!("{err:#}").contains("pipeline creation refused"));
        assert_eq!(backend.frames_acquired.get(), 0);
        assert!(backend.submissions.borrow().is_empty());
    }

    #[test]
    fn broken_shader_aborts_before_pipeline() {
        let mut config = FrameConfig::default();
        config.fragment_shader.wgsl = "@fragment fn main() -> {".into();

        let backend = RecordingBackend::default();
        assert!(FrameRenderer::new(config).render(&backend).is_err());
        assert!(backend.pipelines.borrow().is_empty());
        assert!(backend.submissions.borrow().is_empty());
    }

    #[test]
    fn draw_call_follows_vertex_count() {
        let config = FrameConfig {
            vertices: [TRIANGLE, TRIANGLE].concat(),
            ..FrameConfig::default()
        };
        assert_eq!(
            FrameRenderer::new(config).draw_call().unwrap(),
            DrawCall::new(6, 1)
        );
    }

    #[test]
    fn empty_vertex_list_is_rejected() {
        let config = FrameConfig {
            vertices: Vec::new(),
            ..FrameConfig::default()
        };
        let backend = RecordingBackend::default();
        assert!(FrameRenderer::new(config).render(&backend).is_err());
        assert!(backend.submissions.borrow().is_empty());
    }
}
