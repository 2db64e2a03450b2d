//! Browser host.
//!
//! The module's start function locates the canvas by id and renders the frame
//! into it once, on the browser's event loop.

use anyhow::Result;
use wasm_bindgen::prelude::*;

use crate::device::{GpuInit, SurfaceHandle};
use crate::logging::init_web_logging;
use crate::render::{self, FrameConfig};

/// Page-side settings.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Id of the `<canvas>` to draw into.
    pub canvas_id: String,
    pub log_level: log::Level,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            log_level: log::Level::Info,
        }
    }
}

/// Called once by wasm-bindgen when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    let config = WebConfig::default();
    init_web_logging(config.log_level);

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = run_on_canvas(&config).await {
            log::error!("failed to render frame: {e:#}");
        }
    });
}

pub async fn run_on_canvas(config: &WebConfig) -> Result<()> {
    let surface = SurfaceHandle::from_element_id(&config.canvas_id)?;
    let gpu = render::run(surface, GpuInit::default(), FrameConfig::default()).await?;

    // The device lives as long as the page.
    std::mem::forget(gpu);
    Ok(())
}
