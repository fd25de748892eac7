use glam::Vec2;

use crate::api::types::Rgb;

/// Slowly breathing radial glow behind everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Nebula {
    pub center: Vec2,
    /// Radius at rest, in logical pixels.
    pub radius: f32,
    pub phase: f32,
    pub phase_speed: f32,
    /// Opacity floor and ceiling.
    pub opacity: [f32; 2],
    /// Peak relative radius growth.
    pub scale_amplitude: f32,
    /// Gradient stops, center outwards.
    pub colors: Vec<Rgb>,
}

impl Nebula {
    /// Breathing level in [0, 1]: 0 at rest, 1 at the peak of the cycle.
    fn breath(&self) -> f32 {
        0.5 - 0.5 * self.phase.cos()
    }

    pub fn current_radius(&self) -> f32 {
        self.radius * (1.0 + self.scale_amplitude * self.breath())
    }

    pub fn current_opacity(&self) -> f32 {
        let [lo, hi] = self.opacity;
        (lo + (hi - lo) * self.breath()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nebula(phase: f32) -> Nebula {
        Nebula {
            center: Vec2::ZERO,
            radius: 100.0,
            phase,
            phase_speed: 0.0,
            opacity: [0.02, 0.04],
            scale_amplitude: 0.01,
            colors: vec![Rgb::WHITE],
        }
    }

    #[test]
    fn rests_at_floor() {
        let n = nebula(0.0);
        assert!((n.current_opacity() - 0.02).abs() < 1e-6);
        assert!((n.current_radius() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn peaks_half_way() {
        let n = nebula(std::f32::consts::PI);
        assert!((n.current_opacity() - 0.04).abs() < 1e-6);
        assert!((n.current_radius() - 101.0).abs() < 1e-3);
    }
}
