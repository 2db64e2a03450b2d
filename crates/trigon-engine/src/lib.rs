//! Trigon engine crate.
//!
//! Draws one hard-coded triangle with wgpu: acquire a surface and device,
//! build a pipeline, record one pass with one draw, submit it once.

pub mod device;
pub mod logging;
pub mod render;

#[cfg(not(target_arch = "wasm32"))]
pub mod window;

#[cfg(target_arch = "wasm32")]
pub mod web;
