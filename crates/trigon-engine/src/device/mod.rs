//! GPU device + surface management.
//!
//! This module is responsible for:
//! - locating the drawable surface (window or canvas)
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - configuring the surface and acquiring its current frame

mod frame;
mod gpu;
mod init;
mod surface;

pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::{choose_alpha_mode, choose_surface_format, SurfaceHandle};
