//! Build the per-pass draw list from the populations, back to front.

use glam::Vec2;

use crate::api::capabilities::RenderPath;
use crate::api::config::{BackdropConfig, ClearMode, ConnectionParams, PointParams};
use crate::components::point::PointObject;
use crate::core::populations::Populations;
use crate::core::surface::Surface;
use crate::renderer::draw_list::{DrawCommand, DrawList};
use crate::renderer::layer::DrawLayer;
use crate::systems::motion::modulate;

const NO_MODULATION: [f32; 2] = [1.0, 1.0];

/// Rebuild `list` for the current state. Pure with respect to `pops`.
pub fn build_draw_list(
    pops: &Populations,
    surface: &Surface,
    config: &BackdropConfig,
    path: RenderPath,
    list: &mut DrawList,
) {
    list.begin(surface.width, surface.height);
    if surface.is_empty() {
        return;
    }

    match config.clear_mode {
        ClearMode::Clear => list.push(DrawCommand::Clear),
        ClearMode::Fade { color, alpha } => list.push(DrawCommand::Fade { color, alpha }),
    }

    list.open_layer(DrawLayer::Nebula);
    if let Some(nebula) = &pops.nebula {
        list.push(DrawCommand::Glow {
            center: nebula.center,
            radius: nebula.current_radius(),
            stops: nebula.colors.clone(),
            alpha: nebula.current_opacity(),
        });
    }

    list.open_layer(DrawLayer::Stars);
    push_points(list, &pops.stars, modulation_of(config.stars.as_ref()));

    list.open_layer(DrawLayer::Debris);
    push_points(list, &pops.debris, modulation_of(config.debris.as_ref()));

    list.open_layer(DrawLayer::Asteroids);
    if let Some(params) = &config.asteroids {
        for rock in &pops.asteroids {
            list.push(DrawCommand::Polygon {
                points: rock.vertices(),
                color: params.color,
                alpha: rock.opacity,
            });
        }
    }

    list.open_layer(DrawLayer::Satellites);
    if let Some(params) = &config.satellites {
        for sat in &pops.satellites {
            for panel in sat.panel_centers() {
                list.push(DrawCommand::Rect {
                    center: panel,
                    half_extents: Vec2::new(sat.size * 1.5, sat.size * 0.5),
                    rotation: sat.rotation,
                    color: params.panel_color,
                    alpha: sat.opacity,
                });
            }
            list.push(DrawCommand::Rect {
                center: sat.pos,
                half_extents: Vec2::new(sat.size, sat.size * 0.6),
                rotation: sat.rotation,
                color: params.body_color,
                alpha: sat.opacity,
            });
            list.push(DrawCommand::Circle {
                center: sat.pos,
                radius: sat.size * 0.5,
                color: params.beacon_color,
                alpha: modulate(sat.blink_phase, params.blink),
            });
        }
    }

    list.open_layer(DrawLayer::Particles);
    if path == RenderPath::Full {
        if let Some(links) = &config.connections {
            push_connections(list, &pops.particles, links);
        }
    }
    push_points(list, &pops.particles, modulation_of(config.particles.as_ref()));

    list.open_layer(DrawLayer::Meteors);
    if let Some(params) = &config.meteors {
        for meteor in &pops.meteors {
            list.push(DrawCommand::Line {
                from: meteor.tail(),
                to: meteor.pos,
                width: params.width,
                color: params.color,
                alpha: meteor.opacity,
            });
            list.push(DrawCommand::Circle {
                center: meteor.pos,
                radius: params.width,
                color: params.color,
                alpha: meteor.opacity,
            });
        }
    }
}

fn modulation_of(params: Option<&PointParams>) -> [f32; 2] {
    params.map(|p| p.modulation).unwrap_or(NO_MODULATION)
}

fn push_points(list: &mut DrawList, points: &[PointObject], band: [f32; 2]) {
    for p in points {
        list.push(DrawCommand::Circle {
            center: p.pos,
            radius: p.size,
            color: p.color,
            alpha: p.opacity * modulate(p.phase, band),
        });
    }
}

/// Lines between every pair of particles closer than the link distance,
/// fading linearly with distance.
fn push_connections(list: &mut DrawList, particles: &[PointObject], links: &ConnectionParams) {
    let max_d2 = links.link_distance * links.link_distance;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let d2 = a.pos.distance_squared(b.pos);
            if d2 >= max_d2 {
                continue;
            }
            let strength = 1.0 - d2.sqrt() / links.link_distance;
            list.push(DrawCommand::Line {
                from: a.pos,
                to: b.pos,
                width: links.width,
                color: links.color,
                alpha: links.max_alpha * strength,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::capabilities::{DeviceClass, Viewport};
    use crate::api::types::Rgb;
    use crate::components::meteor::Meteor;
    use crate::core::rng::Rng;
    use crate::systems::populate::populate;

    fn surface(w: f32, h: f32) -> Surface {
        Surface::from_viewport(Viewport::new(w, h, 1.0), 2.0)
    }

    #[test]
    fn layers_open_back_to_front() {
        let config = BackdropConfig::default();
        let s = surface(1920.0, 1080.0);
        let pops = populate(&config, &s, DeviceClass::Desktop, RenderPath::Full, &mut Rng::new(2));
        let mut list = DrawList::new();
        build_draw_list(&pops, &s, &config, RenderPath::Full, &mut list);

        assert_eq!(list.commands[0], DrawCommand::Clear);
        let order: Vec<DrawLayer> = list.layers.iter().map(|(l, _)| *l).collect();
        assert_eq!(order, DrawLayer::ALL.to_vec());
        assert_eq!(list.layer(DrawLayer::Nebula).len(), 1);
        assert_eq!(list.layer(DrawLayer::Stars).len(), pops.stars.len());
        // Two panels, a body and a beacon per satellite.
        assert_eq!(list.layer(DrawLayer::Satellites).len(), pops.satellites.len() * 4);
    }

    #[test]
    fn every_alpha_in_unit_interval() {
        let config = BackdropConfig::default();
        let s = surface(1280.0, 720.0);
        let pops = populate(&config, &s, DeviceClass::Desktop, RenderPath::Full, &mut Rng::new(77));
        let mut list = DrawList::new();
        build_draw_list(&pops, &s, &config, RenderPath::Full, &mut list);
        for cmd in &list.commands {
            let a = cmd.alpha();
            assert!(a > 0.0 && a <= 1.0, "{:?}", cmd);
        }
    }

    #[test]
    fn fade_mode_starts_with_fade() {
        let mut config = BackdropConfig::default();
        config.clear_mode = ClearMode::Fade {
            alpha: 0.2,
            color: Rgb::BLACK,
        };
        let s = surface(100.0, 100.0);
        let mut list = DrawList::new();
        build_draw_list(&Populations::new(), &s, &config, RenderPath::Full, &mut list);
        assert_eq!(
            list.commands[0],
            DrawCommand::Fade {
                color: Rgb::BLACK,
                alpha: 0.2
            }
        );
    }

    #[test]
    fn connections_only_on_full_path() {
        let mut config = BackdropConfig::default();
        config.connections = Some(ConnectionParams {
            link_distance: 100.0,
            max_alpha: 0.5,
            width: 1.0,
            color: Rgb::WHITE,
        });
        let mut pops = Populations::new();
        pops.particles = vec![
            PointObject::new(Vec2::new(10.0, 10.0)),
            PointObject::new(Vec2::new(60.0, 10.0)),
            PointObject::new(Vec2::new(500.0, 10.0)),
        ];
        let s = surface(800.0, 600.0);
        let mut list = DrawList::new();

        build_draw_list(&pops, &s, &config, RenderPath::Full, &mut list);
        let lines: Vec<&DrawCommand> = list
            .layer(DrawLayer::Particles)
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .collect();
        assert_eq!(lines.len(), 1);
        assert!((lines[0].alpha() - 0.25).abs() < 1e-6);

        build_draw_list(&pops, &s, &config, RenderPath::Simplified, &mut list);
        assert!(!list
            .layer(DrawLayer::Particles)
            .iter()
            .any(|c| matches!(c, DrawCommand::Line { .. })));
    }

    #[test]
    fn meteor_draws_trail_and_head() {
        let config = BackdropConfig::default();
        let mut pops = Populations::new();
        let mut m = Meteor::new(Vec2::new(200.0, 100.0), Vec2::new(6.0, 3.0), 50.0, 0.1);
        m.opacity = 0.4;
        pops.meteors.push(m);
        let s = surface(800.0, 600.0);
        let mut list = DrawList::new();
        build_draw_list(&pops, &s, &config, RenderPath::Full, &mut list);
        let meteors = list.layer(DrawLayer::Meteors);
        assert_eq!(meteors.len(), 2);
        assert!(meteors.iter().all(|c| c.alpha() == 0.4));
    }

    #[test]
    fn empty_surface_draws_nothing() {
        let config = BackdropConfig::default();
        let mut list = DrawList::new();
        let empty = surface(0.0, 0.0);
        build_draw_list(&Populations::new(), &empty, &config, RenderPath::Full, &mut list);
        assert!(list.is_empty());
    }
}
