//! Recorded GPU work: passes, their commands, and the sequence submitted once.
//!
//! `P` and `B` are the backend's pipeline and buffer types. A sequence only
//! borrows them, so everything it references must already exist when it is
//! recorded.

use std::ops::Range;

/// Arguments of a non-indexed draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub vertex_count: u32,
    pub instance_count: u32,
    pub first_vertex: u32,
    pub first_instance: u32,
}

impl DrawCall {
    pub const fn new(vertex_count: u32, instance_count: u32) -> Self {
        Self {
            vertex_count,
            instance_count,
            first_vertex: 0,
            first_instance: 0,
        }
    }

    /// Vertex range; the end clamps at `u32::MAX`.
    pub fn vertices(&self) -> Range<u32> {
        self.first_vertex..self.first_vertex.saturating_add(self.vertex_count)
    }

    pub fn instances(&self) -> Range<u32> {
        self.first_instance..self.first_instance.saturating_add(self.instance_count)
    }
}

#[derive(Debug)]
pub enum PassCommand<'a, P, B> {
    SetPipeline(&'a P),
    SetVertexBuffer { slot: u32, buffer: &'a B },
    Draw(DrawCall),
}

/// A render pass targeting the surface's current frame.
#[derive(Debug)]
pub struct RenderPass<'a, P, B> {
    pub label: &'a str,
    /// Color the frame is cleared to before the commands run.
    pub clear: wgpu::Color,
    pub commands: Vec<PassCommand<'a, P, B>>,
}

impl<'a, P, B> RenderPass<'a, P, B> {
    pub fn new(label: &'a str, clear: wgpu::Color) -> Self {
        Self {
            label,
            clear,
            commands: Vec::new(),
        }
    }

    pub fn set_pipeline(mut self, pipeline: &'a P) -> Self {
        self.commands.push(PassCommand::SetPipeline(pipeline));
        self
    }

    pub fn set_vertex_buffer(mut self, slot: u32, buffer: &'a B) -> Self {
        self.commands.push(PassCommand::SetVertexBuffer { slot, buffer });
        self
    }

    pub fn draw(mut self, call: DrawCall) -> Self {
        self.commands.push(PassCommand::Draw(call));
        self
    }
}

/// Ordered render passes, submitted as a unit.
#[derive(Debug)]
pub struct CommandSequence<'a, P, B> {
    pub label: &'a str,
    pub passes: Vec<RenderPass<'a, P, B>>,
}

impl<'a, P, B> CommandSequence<'a, P, B> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            passes: Vec::new(),
        }
    }

    /// Appends a finished pass.
    pub fn push(&mut self, pass: RenderPass<'a, P, B>) {
        self.passes.push(pass);
    }

    /// All draws across all passes, in recording order.
    pub fn draw_calls(&self) -> impl Iterator<Item = DrawCall> + '_ {
        self.passes.iter().flat_map(|pass| {
            pass.commands.iter().filter_map(|cmd| match cmd {
                PassCommand::Draw(call) => Some(*call),
                _ => None,
            })
        })
    }
}

impl CommandSequence<'_, wgpu::RenderPipeline, wgpu::Buffer> {
    /// Records every pass into `encoder`, each one rendering into `target`.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        for pass in &self.passes {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(pass.label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(pass.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for cmd in &pass.commands {
                match cmd {
                    PassCommand::SetPipeline(pipeline) => rpass.set_pipeline(pipeline),
                    PassCommand::SetVertexBuffer { slot, buffer } => {
                        rpass.set_vertex_buffer(*slot, buffer.slice(..));
                    }
                    PassCommand::Draw(call) => rpass.draw(call.vertices(), call.instances()),
                }
            }
        }
    }
}
