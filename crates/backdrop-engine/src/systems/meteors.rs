//! Meteor lifecycle: move, decay, cull, spawn.

use glam::Vec2;

use crate::api::config::MeteorParams;
use crate::components::meteor::Meteor;
use crate::core::rng::Rng;
use crate::core::surface::Surface;

/// Advance every meteor one pass, then drop the ones that faded out or left
/// the surface extended by `exit_margin`. A meteor is removed on the very pass
/// its opacity reaches zero, so it is never drawn at opacity <= 0.
pub fn step_meteors(meteors: &mut Vec<Meteor>, surface: &Surface, exit_margin: f32) {
    meteors.retain_mut(|m| {
        m.pos += m.vel;
        m.age_one_pass() && m.within(surface.width, surface.height, exit_margin)
    });
}

/// Roll for a new meteor. Returns true if one was spawned.
pub fn maybe_spawn(
    meteors: &mut Vec<Meteor>,
    params: &MeteorParams,
    cap: usize,
    surface: &Surface,
    rng: &mut Rng,
) -> bool {
    if meteors.len() >= cap || surface.is_empty() {
        return false;
    }
    if !rng.chance(params.spawn_chance) {
        return false;
    }
    let pos = Vec2::new(
        rng.range(0.0, surface.width),
        rng.range(0.0, surface.height * params.spawn_band),
    );
    let trail_len = rng.range(params.trail_len[0], params.trail_len[1]);
    meteors.push(Meteor::new(pos, params.velocity, trail_len, params.decay));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::capabilities::Viewport;

    fn surface() -> Surface {
        Surface::from_viewport(Viewport::new(800.0, 600.0, 1.0), 2.0)
    }

    #[test]
    fn removed_exactly_when_opacity_hits_zero() {
        let s = surface();
        let mut meteors = vec![Meteor::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.5),
            40.0,
            0.25,
        )];
        for pass in 1..=3 {
            step_meteors(&mut meteors, &s, 100.0);
            assert_eq!(meteors.len(), 1, "alive after pass {}", pass);
            assert!(meteors[0].opacity > 0.0);
        }
        assert_eq!(meteors[0].opacity, 0.25);
        step_meteors(&mut meteors, &s, 100.0);
        assert!(meteors.is_empty());
    }

    #[test]
    fn inexact_decay_fades_on_exact_pass() {
        let s = surface();
        for (decay, passes) in [(0.2_f32, 5u32), (0.05, 20), (0.02, 50), (0.01, 100)] {
            let mut meteors = vec![Meteor::new(Vec2::new(400.0, 0.0), Vec2::ZERO, 40.0, decay)];
            for pass in 1..passes {
                step_meteors(&mut meteors, &s, 100.0);
                assert_eq!(meteors.len(), 1, "decay {} gone early at pass {}", decay, pass);
                assert!(meteors[0].opacity > 0.0);
            }
            step_meteors(&mut meteors, &s, 100.0);
            assert!(meteors.is_empty(), "decay {} alive after pass {}", decay, passes);
        }
    }

    #[test]
    fn culled_past_exit_margin() {
        let s = surface();
        let mut meteors = vec![Meteor::new(
            Vec2::new(895.0, 300.0),
            Vec2::new(6.0, 3.0),
            40.0,
            0.01,
        )];
        step_meteors(&mut meteors, &s, 100.0);
        // 901 > 800 + 100
        assert!(meteors.is_empty());
    }

    #[test]
    fn spawn_respects_cap() {
        let s = surface();
        let params = MeteorParams {
            spawn_chance: 1.0,
            ..MeteorParams::default()
        };
        let mut rng = Rng::new(8);
        let mut meteors = Vec::new();
        for _ in 0..10 {
            maybe_spawn(&mut meteors, &params, 3, &s, &mut rng);
        }
        assert_eq!(meteors.len(), 3);
        for m in &meteors {
            assert_eq!(m.opacity, 1.0);
            assert_eq!(m.vel, params.velocity);
            assert!(m.pos.y <= s.height * params.spawn_band);
        }
    }

    #[test]
    fn zero_chance_never_spawns() {
        let s = surface();
        let params = MeteorParams {
            spawn_chance: 0.0,
            ..MeteorParams::default()
        };
        let mut rng = Rng::new(8);
        let mut meteors = Vec::new();
        for _ in 0..1000 {
            assert!(!maybe_spawn(&mut meteors, &params, 3, &s, &mut rng));
        }
    }
}
