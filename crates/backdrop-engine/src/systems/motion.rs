//! Motion, wrap-around and phase updates for the persistent populations.

use glam::Vec2;

use crate::components::asteroid::Asteroid;
use crate::components::point::PointObject;
use crate::components::satellite::Satellite;

/// An object that drifts at constant velocity, wraps at the surface edges and
/// carries one or more oscillators.
pub trait Drift {
    fn pos(&self) -> Vec2;
    fn set_pos(&mut self, pos: Vec2);
    fn vel(&self) -> Vec2;
    /// Advance every oscillator (twinkle, blink, rotation) by one pass.
    fn advance_phase(&mut self);
}

impl Drift for PointObject {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }

    fn advance_phase(&mut self) {
        self.phase += self.phase_speed;
    }
}

impl Drift for Satellite {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }

    fn advance_phase(&mut self) {
        self.rotation += self.spin;
        self.blink_phase += self.blink_speed;
    }
}

impl Drift for Asteroid {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }

    fn advance_phase(&mut self) {
        self.rotation += self.spin;
    }
}

/// Wrap a coordinate into [0, size). Degenerate sizes collapse to 0.
pub fn wrap_coord(v: f32, size: f32) -> f32 {
    if !(size > 0.0) || !v.is_finite() {
        return 0.0;
    }
    let r = v.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs.
    if r >= size {
        0.0
    } else {
        r
    }
}

/// Wrap a position into the `width` x `height` surface.
pub fn wrap(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, width), wrap_coord(pos.y, height))
}

/// One pass for a wrapping population: move, wrap, advance phases.
pub fn drift_all<T: Drift>(items: &mut [T], width: f32, height: f32) {
    for item in items.iter_mut() {
        let next = item.pos() + item.vel();
        item.set_pos(wrap(next, width, height));
        item.advance_phase();
    }
}

/// Pull every object back inside a (new) surface without moving it otherwise.
pub fn rewrap_all<T: Drift>(items: &mut [T], width: f32, height: f32) {
    for item in items.iter_mut() {
        item.set_pos(wrap(item.pos(), width, height));
    }
}

/// Sine brightness modulation between `floor` and `ceil`, clamped to [0, 1].
#[inline]
pub fn modulate(phase: f32, [floor, ceil]: [f32; 2]) -> f32 {
    let wave = phase.sin() * 0.5 + 0.5;
    (floor + (ceil - floor) * wave).clamp(0.0, 1.0)
}
