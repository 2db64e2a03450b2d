//! Native host.
//!
//! Owns the `winit` EventLoop and the window that serves as the drawing
//! surface, and renders the frame once the window exists.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
