#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

#[cfg(target_arch = "wasm32")]
use anyhow::{anyhow, Context, Result};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// The drawable region a frame is rendered into.
///
/// On the web this is a `<canvas>` located by element id; natively it is the
/// host window. The handle is created once and never mutated.
#[derive(Debug, Clone)]
pub enum SurfaceHandle {
    #[cfg(not(target_arch = "wasm32"))]
    Window(Arc<winit::window::Window>),
    #[cfg(target_arch = "wasm32")]
    Canvas(web_sys::HtmlCanvasElement),
}

impl SurfaceHandle {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_window(window: Arc<winit::window::Window>) -> Self {
        Self::Window(window)
    }

    /// Looks up `id` in the current document and binds to it as a canvas.
    #[cfg(target_arch = "wasm32")]
    pub fn from_element_id(id: &str) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .context("no document available")?;

        let element = document
            .get_element_by_id(id)
            .with_context(|| format!("no element with id `{id}`"))?;
        log::debug!("surface element: {element:?}");

        let canvas = element
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| anyhow!("element `{id}` is not a canvas"))?;

        Ok(Self::Canvas(canvas))
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            Self::Window(window) => {
                let size = window.inner_size();
                (size.width, size.height)
            }
            #[cfg(target_arch = "wasm32")]
            Self::Canvas(canvas) => (canvas.width(), canvas.height()),
        }
    }

    /// Converts the handle into a target wgpu can create a surface from.
    pub fn into_target(self) -> wgpu::SurfaceTarget<'static> {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            Self::Window(window) => wgpu::SurfaceTarget::from(window),
            #[cfg(target_arch = "wasm32")]
            Self::Canvas(canvas) => wgpu::SurfaceTarget::Canvas(canvas),
        }
    }
}

/// Picks the color target format for the surface.
///
/// `preferred` wins when supported; otherwise the surface's first format is used.
pub fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    preferred: wgpu::TextureFormat,
) -> Option<wgpu::TextureFormat> {
    if formats.contains(&preferred) {
        return Some(preferred);
    }

    formats.first().copied()
}

pub fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    #[test]
    fn preferred_format_wins_when_supported() {
        let formats = [TextureFormat::Rgba8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(
            choose_surface_format(&formats, TextureFormat::Bgra8Unorm),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba8Unorm, TextureFormat::Rgba16Float];
        assert_eq!(
            choose_surface_format(&formats, TextureFormat::Bgra8Unorm),
            Some(TextureFormat::Rgba8Unorm)
        );
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_surface_format(&[], TextureFormat::Bgra8Unorm), None);
    }

    #[test]
    fn unsupported_alpha_mode_is_replaced() {
        let modes = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }
}
