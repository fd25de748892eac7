//! Population generators. Each is a pure function of the surface, the tuning
//! and the random source.

use glam::Vec2;

use crate::api::capabilities::{DeviceClass, RenderPath};
use crate::api::types::Rgb;
use crate::api::config::{
    AsteroidParams, BackdropConfig, Density, NebulaParams, PointParams, SatelliteParams,
};
use crate::components::asteroid::Asteroid;
use crate::components::nebula::Nebula;
use crate::components::point::PointObject;
use crate::components::satellite::Satellite;
use crate::core::populations::Populations;
use crate::core::rng::Rng;
use crate::core::surface::Surface;
use crate::systems::motion::rewrap_all;

/// `min(cap, floor(width * height / density))`. Zero for degenerate input.
pub fn population_count(width: f32, height: f32, density: f32, cap: usize) -> usize {
    if !(width > 0.0 && height > 0.0 && density > 0.0) {
        return 0;
    }
    let raw = (width as f64 * height as f64 / density as f64).floor();
    if raw.is_finite() {
        (raw as usize).min(cap)
    } else {
        0
    }
}

fn count_for(density: &Density, surface: &Surface, class: DeviceClass) -> usize {
    population_count(surface.width, surface.height, density.per_px2, density.cap(class))
}

fn sample(rng: &mut Rng, [min, max]: [f32; 2]) -> f32 {
    rng.range(min, max)
}

fn drift_velocity(rng: &mut Rng, speed: f32) -> Vec2 {
    Vec2::new(rng.symmetric(speed), rng.symmetric(speed))
}

/// Stars, particles and debris share one generator.
pub fn generate_points(
    params: &PointParams,
    surface: &Surface,
    class: DeviceClass,
    rng: &mut Rng,
) -> Vec<PointObject> {
    let count = count_for(&params.density, surface, class);
    (0..count)
        .map(|_| {
            let pos = rng.point_in(surface.width, surface.height);
            let vel = drift_velocity(rng, params.speed);
            let size = sample(rng, params.size);
            let opacity = sample(rng, params.opacity);
            let phase = rng.range(0.0, std::f32::consts::TAU);
            let phase_speed = sample(rng, params.phase_speed);
            let color = rng.pick(&params.palette).copied().unwrap_or(Rgb::WHITE);
            PointObject::new(pos)
                .with_vel(vel)
                .with_size(size)
                .with_opacity(opacity)
                .with_color(color)
                .with_phase(phase, phase_speed)
        })
        .collect()
}

pub fn generate_asteroids(
    params: &AsteroidParams,
    surface: &Surface,
    class: DeviceClass,
    rng: &mut Rng,
) -> Vec<Asteroid> {
    let count = count_for(&params.density, surface, class);
    (0..count)
        .map(|_| {
            let pos = rng.point_in(surface.width, surface.height);
            let vel = drift_velocity(rng, params.speed);
            let size = sample(rng, params.size);
            let opacity = sample(rng, params.opacity).clamp(0.0, 1.0);
            let rotation = rng.range(0.0, std::f32::consts::TAU);
            let spin = rng.symmetric(params.spin);
            let outline = (0..params.vertices)
                .map(|_| rng.range(1.0 - params.roughness, 1.0 + params.roughness))
                .collect();
            Asteroid {
                pos,
                vel,
                size,
                opacity,
                rotation,
                spin,
                outline,
            }
        })
        .collect()
}

pub fn generate_satellites(
    params: &SatelliteParams,
    surface: &Surface,
    class: DeviceClass,
    rng: &mut Rng,
) -> Vec<Satellite> {
    let count = count_for(&params.density, surface, class);
    (0..count)
        .map(|_| Satellite {
            pos: rng.point_in(surface.width, surface.height),
            vel: drift_velocity(rng, params.speed),
            size: sample(rng, params.size),
            opacity: sample(rng, params.opacity).clamp(0.0, 1.0),
            rotation: rng.range(0.0, std::f32::consts::TAU),
            spin: rng.symmetric(params.spin),
            blink_phase: rng.range(0.0, std::f32::consts::TAU),
            blink_speed: sample(rng, params.blink_speed),
        })
        .collect()
}

/// The glow is centered on its anchor box, which is `2 * radius` wide.
pub fn generate_nebula(params: &NebulaParams, surface: &Surface) -> Nebula {
    let corner = Vec2::new(surface.width, surface.height) * params.anchor;
    Nebula {
        center: corner + Vec2::splat(params.radius),
        radius: params.radius,
        phase: 0.0,
        phase_speed: params.phase_speed,
        opacity: params.opacity,
        scale_amplitude: params.scale_amplitude,
        colors: params.colors.clone(),
    }
}

/// Build every population from scratch. Meteors start empty.
pub fn populate(
    config: &BackdropConfig,
    surface: &Surface,
    class: DeviceClass,
    path: RenderPath,
    rng: &mut Rng,
) -> Populations {
    let mut pops = Populations::new();
    regenerate_field(&mut pops, config, surface, class, path, rng);
    pops.debris = config
        .debris
        .as_ref()
        .map(|p| generate_points(p, surface, class, rng))
        .unwrap_or_default();
    pops.asteroids = config
        .asteroids
        .as_ref()
        .map(|p| generate_asteroids(p, surface, class, rng))
        .unwrap_or_default();
    pops.satellites = config
        .satellites
        .as_ref()
        .map(|p| generate_satellites(p, surface, class, rng))
        .unwrap_or_default();
    pops
}

/// Regenerate the star field, the particles and the nebula; leave movers alone.
pub fn regenerate_field(
    pops: &mut Populations,
    config: &BackdropConfig,
    surface: &Surface,
    class: DeviceClass,
    path: RenderPath,
    rng: &mut Rng,
) {
    pops.nebula = match (&config.nebula, path) {
        (Some(p), RenderPath::Full) if !surface.is_empty() => Some(generate_nebula(p, surface)),
        _ => None,
    };
    pops.stars = config
        .stars
        .as_ref()
        .map(|p| generate_points(p, surface, class, rng))
        .unwrap_or_default();
    pops.particles = config
        .particles
        .as_ref()
        .map(|p| generate_points(p, surface, class, rng))
        .unwrap_or_default();
}

/// Keep satellites, asteroids, debris and meteors, pulled inside the new bounds.
/// Meteors are not wrapped; they are culled by the next pass if outside.
pub fn preserve_movers(pops: &mut Populations, surface: &Surface) {
    rewrap_all(&mut pops.debris, surface.width, surface.height);
    rewrap_all(&mut pops.asteroids, surface.width, surface.height);
    rewrap_all(&mut pops.satellites, surface.width, surface.height);
}
