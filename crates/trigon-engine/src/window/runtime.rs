use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit, SurfaceHandle};
use crate::render::{FrameConfig, FrameRenderer};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Entry point for the native host.
pub struct Runtime;

impl Runtime {
    /// Opens a window, renders `frame` into it once, and waits for the window to close.
    ///
    /// The device is acquired on the first resume; the frame is drawn on the
    /// window's first redraw. A failure at either point closes the event loop
    /// and is returned as the error.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, frame: FrameConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = HostState::new(config, gpu_init, frame);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Where the host is in its single-frame lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum FramePhase {
    AwaitingWindow,
    AwaitingRedraw,
    Rendered,
}

impl FramePhase {
    /// True exactly once: on the first resume.
    fn begin_setup(&mut self) -> bool {
        if *self != FramePhase::AwaitingWindow {
            return false;
        }
        *self = FramePhase::AwaitingRedraw;
        true
    }

    /// True exactly once: on the first redraw after setup.
    fn begin_render(&mut self) -> bool {
        if *self != FramePhase::AwaitingRedraw {
            return false;
        }
        *self = FramePhase::Rendered;
        true
    }
}

struct HostState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    renderer: FrameRenderer,
    phase: FramePhase,

    window: Option<Arc<Window>>,
    /// Held until exit; the rendered frame stays on screen as long as the device lives.
    gpu: Option<Gpu>,
    failure: Option<anyhow::Error>,
}

impl HostState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, frame: FrameConfig) -> Self {
        Self {
            config,
            gpu_init,
            renderer: FrameRenderer::new(frame),
            phase: FramePhase::AwaitingWindow,
            window: None,
            gpu: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("failed to render frame: {err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let surface = SurfaceHandle::from_window(Arc::clone(&window));
        let gpu = pollster::block_on(Gpu::new(surface, self.gpu_init.clone()))?;

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn render(&self) -> Result<()> {
        let (Some(window), Some(gpu)) = (self.window.as_ref(), self.gpu.as_ref()) else {
            anyhow::bail!("redraw arrived before the device was ready");
        };

        window.pre_present_notify();
        self.renderer.render(gpu)
    }
}

impl ApplicationHandler for HostState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.phase.begin_setup() {
            return;
        }

        if let Err(e) = self.setup(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::debug!("window closed");
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                if !self.phase.begin_render() {
                    return;
                }

                if let Err(e) = self.render() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }
}
