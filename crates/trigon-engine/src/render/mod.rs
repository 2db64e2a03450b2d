//! Triangle rendering.
//!
//! The frame is described independently of wgpu (`PipelineDesc`,
//! `CommandSequence`) and handed to a [`RenderBackend`]; [`crate::device::Gpu`]
//! is the wgpu implementation.

mod backend;
mod commands;
mod frame;
mod pipeline;
mod shaders;
mod vertex;

pub use backend::RenderBackend;
pub use commands::{CommandSequence, DrawCall, PassCommand, RenderPass};
pub use frame::{run, FrameConfig, FrameRenderer};
pub use pipeline::{triangle_primitive, PipelineDesc, StageDesc};
pub use shaders::{
    IoFormat, ShaderSource, Stage, StageInterface, TRIANGLE_FRAGMENT_WGSL, TRIANGLE_VERTEX_WGSL,
};
pub use vertex::{Vertex, TRIANGLE};
