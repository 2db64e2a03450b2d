#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use trigon_engine::device::GpuInit;
    use trigon_engine::logging::{init_logging, LoggingConfig};
    use trigon_engine::render::FrameConfig;
    use trigon_engine::window::{Runtime, RuntimeConfig};

    init_logging(LoggingConfig::default());
    log::info!("trigon: drawing one triangle");

    Runtime::run(
        RuntimeConfig {
            title: "trigon triangle".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default(),
        FrameConfig::default(),
    )
}

// In the browser the engine's wasm start function is the entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
