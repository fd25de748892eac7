use glam::Vec2;

/// A tumbling rock with an irregular outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Mean radius in logical pixels.
    pub size: f32,
    pub opacity: f32,
    pub rotation: f32,
    /// Rotation per pass.
    pub spin: f32,
    /// Per-vertex radius factors around the outline, fixed at creation.
    pub outline: Vec<f32>,
}

impl Asteroid {
    /// Outline vertices in world space at the current rotation.
    pub fn vertices(&self) -> Vec<Vec2> {
        let n = self.outline.len();
        self.outline
            .iter()
            .enumerate()
            .map(|(i, factor)| {
                let angle = self.rotation + i as f32 / n as f32 * std::f32::consts::TAU;
                self.pos + Vec2::from_angle(angle) * (self.size * factor)
            })
            .collect()
    }
}
