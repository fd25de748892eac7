use backdrop_engine::{CapabilityQuery, Viewport};
use web_sys::Window;

/// Reads the browser viewport. Reduced-motion is supplied by the host page,
/// which evaluates `prefers-reduced-motion` itself.
pub struct WindowCapabilities {
    window: Window,
    reduced_motion: bool,
    compact_breakpoint: f32,
}

impl WindowCapabilities {
    pub fn new(window: Window, reduced_motion: bool, compact_breakpoint: f32) -> Self {
        Self {
            window,
            reduced_motion,
            compact_breakpoint,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl CapabilityQuery for WindowCapabilities {
    fn viewport(&self) -> Viewport {
        let fallback = Viewport::default();
        let width = read_px(self.window.inner_width().ok()).unwrap_or(fallback.width);
        let height = read_px(self.window.inner_height().ok()).unwrap_or(fallback.height);
        Viewport::new(width, height, self.window.device_pixel_ratio() as f32)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn is_compact(&self) -> bool {
        self.viewport().width < self.compact_breakpoint
    }
}

fn read_px(value: Option<wasm_bindgen::JsValue>) -> Option<f32> {
    value?.as_f64().map(|v| v as f32)
}
