//! Draw target trait for rendering backends.
//!
//! The engine never touches a canvas. It builds a [`DrawList`] per pass and a
//! backend replays it. The web bridge implements this over
//! `CanvasRenderingContext2d`; [`RecordingTarget`] records calls for tests.

use glam::Vec2;

use super::draw_list::{DrawCommand, DrawList};
use crate::api::types::Rgb;

/// A 2D surface that can execute draw commands, in logical pixels.
///
/// Every method is best effort: backends log and swallow their own failures.
pub trait DrawTarget {
    /// Backend identifier (e.g., "canvas2d", "recording").
    fn backend(&self) -> &'static str;

    fn clear(&mut self, width: f32, height: f32);

    fn fade(&mut self, width: f32, height: f32, color: Rgb, alpha: f32);

    fn glow(&mut self, center: Vec2, radius: f32, stops: &[Rgb], alpha: f32);

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32);

    fn rect(&mut self, center: Vec2, half_extents: Vec2, rotation: f32, color: Rgb, alpha: f32);

    fn polygon(&mut self, points: &[Vec2], color: Rgb, alpha: f32);

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb, alpha: f32);
}

/// Execute every command of `list` on `target`, in order.
pub fn replay<T: DrawTarget + ?Sized>(list: &DrawList, target: &mut T) {
    let (w, h) = (list.width, list.height);
    for command in &list.commands {
        match command {
            DrawCommand::Clear => target.clear(w, h),
            DrawCommand::Fade { color, alpha } => target.fade(w, h, *color, *alpha),
            DrawCommand::Glow {
                center,
                radius,
                stops,
                alpha,
            } => target.glow(*center, *radius, stops, *alpha),
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
            } => target.circle(*center, *radius, *color, *alpha),
            DrawCommand::Rect {
                center,
                half_extents,
                rotation,
                color,
                alpha,
            } => target.rect(*center, *half_extents, *rotation, *color, *alpha),
            DrawCommand::Polygon { points, color, alpha } => {
                if points.len() >= 3 {
                    target.polygon(points, *color, *alpha);
                }
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
                alpha,
            } => target.line(*from, *to, *width, *color, *alpha),
        }
    }
}

/// Records the kind and alpha of every call it receives.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub calls: Vec<(&'static str, f32)>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.calls.iter().filter(|(k, _)| *k == kind).count()
    }
}

impl DrawTarget for RecordingTarget {
    fn backend(&self) -> &'static str {
        "recording"
    }

    fn clear(&mut self, _width: f32, _height: f32) {
        self.calls.push(("clear", 1.0));
    }

    fn fade(&mut self, _width: f32, _height: f32, _color: Rgb, alpha: f32) {
        self.calls.push(("fade", alpha));
    }

    fn glow(&mut self, _center: Vec2, _radius: f32, _stops: &[Rgb], alpha: f32) {
        self.calls.push(("glow", alpha));
    }

    fn circle(&mut self, _center: Vec2, _radius: f32, _color: Rgb, alpha: f32) {
        self.calls.push(("circle", alpha));
    }

    fn rect(&mut self, _center: Vec2, _half: Vec2, _rotation: f32, _color: Rgb, alpha: f32) {
        self.calls.push(("rect", alpha));
    }

    fn polygon(&mut self, _points: &[Vec2], _color: Rgb, alpha: f32) {
        self.calls.push(("polygon", alpha));
    }

    fn line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Rgb, alpha: f32) {
        self.calls.push(("line", alpha));
    }
}
