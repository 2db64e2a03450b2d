use bytemuck::{Pod, Zeroable};

/// A single clip-space 2D position.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    pub const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &Self::ATTRS,
    };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }
}

/// The hard-coded triangle, counter-clockwise.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(0.0, 0.5),
    Vertex::new(-0.5, -0.5),
    Vertex::new(0.5, -0.5),
];
