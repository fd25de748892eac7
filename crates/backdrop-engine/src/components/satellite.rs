use glam::Vec2;

/// A slow-moving satellite with two solar panels and a blinking beacon.
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Body half-size in logical pixels.
    pub size: f32,
    pub opacity: f32,
    /// Body orientation in radians.
    pub rotation: f32,
    /// Rotation per pass.
    pub spin: f32,
    /// Beacon blink phase (radians, unbounded).
    pub blink_phase: f32,
    /// Blink phase advance per pass.
    pub blink_speed: f32,
}

impl Satellite {
    /// Panel centers on either side of the body, in world space.
    pub fn panel_centers(&self) -> [Vec2; 2] {
        let axis = Vec2::from_angle(self.rotation) * (self.size * 2.5);
        [self.pos - axis, self.pos + axis]
    }
}
