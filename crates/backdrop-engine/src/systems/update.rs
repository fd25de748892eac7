use crate::core::populations::Populations;
use crate::core::surface::Surface;
use crate::systems::meteors::step_meteors;
use crate::systems::motion::drift_all;

/// Motion, boundary and phase update for every population, in draw order.
/// Meteors outside the surface grown by `meteor_margin` are culled.
pub fn advance_populations(pops: &mut Populations, surface: &Surface, meteor_margin: f32) {
    let (w, h) = (surface.width, surface.height);
    if let Some(nebula) = pops.nebula.as_mut() {
        nebula.phase += nebula.phase_speed;
    }
    drift_all(&mut pops.stars, w, h);
    drift_all(&mut pops.debris, w, h);
    drift_all(&mut pops.asteroids, w, h);
    drift_all(&mut pops.satellites, w, h);
    drift_all(&mut pops.particles, w, h);
    step_meteors(&mut pops.meteors, surface, meteor_margin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::capabilities::Viewport;
    use crate::components::meteor::Meteor;
    use crate::components::point::PointObject;
    use glam::Vec2;

    #[test]
    fn advances_every_kind() {
        let s = Surface::from_viewport(Viewport::new(100.0, 100.0, 1.0), 2.0);
        let mut pops = Populations::new();
        pops.stars.push(PointObject::new(Vec2::new(50.0, 50.0)).with_phase(0.0, 0.5));
        pops.particles.push(PointObject::new(Vec2::new(99.0, 50.0)).with_vel(Vec2::new(2.0, 0.0)));
        pops.meteors.push(Meteor::new(Vec2::new(10.0, 10.0), Vec2::new(4.0, 2.0), 20.0, 0.5));

        advance_populations(&mut pops, &s, 50.0);
        assert_eq!(pops.stars[0].phase, 0.5);
        assert_eq!(pops.particles[0].pos, Vec2::new(1.0, 50.0));
        assert_eq!(pops.meteors[0].pos, Vec2::new(14.0, 12.0));

        advance_populations(&mut pops, &s, 50.0);
        assert!(pops.meteors.is_empty());
    }
}
