use std::f64::consts::TAU;

use backdrop_engine::{DrawTarget, Rgb, Surface};
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas 2D backend for engine draw lists.
///
/// Draw calls are best effort: a failing browser call is logged and the rest
/// of the pass continues.
pub struct CanvasTarget {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasTarget {
    /// Acquire the 2D context. `None` means the environment can't draw and the
    /// backdrop stays a no-op.
    pub fn acquire(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => obj.dyn_into::<CanvasRenderingContext2d>().ok()?,
            Ok(None) => return None,
            Err(err) => {
                warn_js("getContext(2d)", &err);
                return None;
            }
        };
        Some(Self { canvas, ctx })
    }

    /// Match the backing buffer to the surface and reset the scale transform,
    /// so all subsequent drawing uses logical pixels.
    pub fn apply_surface(&self, surface: &Surface) {
        self.canvas.set_width(surface.backing_width);
        self.canvas.set_height(surface.backing_height);
        let style = self.canvas.style();
        let width = format!("{}px", surface.width);
        let height = format!("{}px", surface.height);
        check("style.width", style.set_property("width", &width));
        check("style.height", style.set_property("height", &height));
        let dpr = surface.pixel_ratio as f64;
        let scaled = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        check("setTransform", scaled);
    }

    fn fill_with(&self, color: Rgb, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(&css(color));
    }
}

impl DrawTarget for CanvasTarget {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fade(&mut self, width: f32, height: f32, color: Rgb, alpha: f32) {
        self.fill_with(color, alpha);
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
        self.ctx.set_global_alpha(1.0);
    }

    fn glow(&mut self, center: Vec2, radius: f32, stops: &[Rgb], alpha: f32) {
        let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);
        let gradient = match self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) {
            Ok(g) => g,
            Err(err) => return warn_js("createRadialGradient", &err),
        };
        let n = stops.len().max(1) as f32;
        for (i, color) in stops.iter().enumerate() {
            let stop = gradient.add_color_stop(i as f32 / n, &css(*color));
            check("addColorStop", stop);
        }
        let edge = stops.last().copied().unwrap_or(Rgb::BLACK);
        let stop = gradient.add_color_stop(1.0, &css_transparent(edge));
        check("addColorStop", stop);

        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        check("arc", self.ctx.arc(x, y, r, 0.0, TAU));
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        self.fill_with(color, alpha);
        self.ctx.begin_path();
        let (x, y) = (center.x as f64, center.y as f64);
        check("arc", self.ctx.arc(x, y, radius as f64, 0.0, TAU));
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn rect(&mut self, center: Vec2, half_extents: Vec2, rotation: f32, color: Rgb, alpha: f32) {
        self.ctx.save();
        let (x, y) = (center.x as f64, center.y as f64);
        check("translate", self.ctx.translate(x, y));
        check("rotate", self.ctx.rotate(rotation as f64));
        self.fill_with(color, alpha);
        self.ctx.fill_rect(
            -half_extents.x as f64,
            -half_extents.y as f64,
            half_extents.x as f64 * 2.0,
            half_extents.y as f64 * 2.0,
        );
        self.ctx.restore();
    }

    fn polygon(&mut self, points: &[Vec2], color: Rgb, alpha: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.fill_with(color, alpha);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_stroke_style_str(&css(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        self.ctx.set_global_alpha(1.0);
    }
}

fn css(color: Rgb) -> String {
    format!("rgb({}, {}, {})", color.r, color.g, color.b)
}

fn css_transparent(color: Rgb) -> String {
    format!("rgba({}, {}, {}, 0)", color.r, color.g, color.b)
}

fn check(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn_js(what, &err);
    }
}

pub(crate) fn warn_js(what: &str, err: &JsValue) {
    log::warn!("backdrop: {} failed: {:?}", what, err);
}
