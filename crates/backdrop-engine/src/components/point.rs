use glam::Vec2;

use crate::api::types::Rgb;

/// A star, drifting particle or debris fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct PointObject {
    /// Position in logical pixels.
    pub pos: Vec2,
    /// Velocity in logical pixels per pass.
    pub vel: Vec2,
    /// Radius in logical pixels.
    pub size: f32,
    /// Base opacity in [0, 1].
    pub opacity: f32,
    pub color: Rgb,
    /// Oscillation phase (radians). Unbounded; only read through `sin`.
    pub phase: f32,
    /// Phase advance per pass.
    pub phase_speed: f32,
}

impl PointObject {
    /// A white, fully opaque, motionless point of radius 1.
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: 1.0,
            opacity: 1.0,
            color: Rgb::WHITE,
            phase: 0.0,
            phase_speed: 0.0,
        }
    }

    // -- Builder pattern --

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_phase(mut self, phase: f32, phase_speed: f32) -> Self {
        self.phase = phase;
        self.phase_speed = phase_speed;
        self
    }
}
