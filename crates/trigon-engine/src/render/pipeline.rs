//! Pipeline description shared by every backend.

use super::vertex::Vertex;

/// A compiled shader module paired with the entry point to call.
#[derive(Debug)]
pub struct StageDesc<'a, S> {
    pub module: &'a S,
    pub entry_point: &'a str,
}

/// Everything needed to build the render pipeline.
///
/// `S` is the backend's compiled shader type.
#[derive(Debug)]
pub struct PipelineDesc<'a, S> {
    pub label: &'a str,
    pub vertex: StageDesc<'a, S>,
    pub fragment: StageDesc<'a, S>,
    pub vertex_layout: wgpu::VertexBufferLayout<'static>,
    pub target_format: wgpu::TextureFormat,
    pub primitive: wgpu::PrimitiveState,
}

impl<'a, S> PipelineDesc<'a, S> {
    /// Triangle pipeline writing a single color target of `target_format`.
    pub fn triangle(
        vertex: StageDesc<'a, S>,
        fragment: StageDesc<'a, S>,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            label: "trigon triangle pipeline",
            vertex,
            fragment,
            vertex_layout: Vertex::LAYOUT,
            target_format,
            primitive: triangle_primitive(),
        }
    }
}

/// Triangle list, counter-clockwise front face, both faces drawn.
pub fn triangle_primitive() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}
