use crate::api::capabilities::{CapabilityQuery, DeviceClass, FixedCapabilities, RenderPath};
use crate::api::config::BackdropConfig;
use crate::api::types::FrameOutcome;
use crate::core::debounce::Debouncer;
use crate::core::populations::Populations;
use crate::core::rng::Rng;
use crate::core::surface::Surface;
use crate::core::time::FrameLimiter;
use crate::renderer::draw_list::DrawList;
use crate::systems::draw::build_draw_list;
use crate::systems::meteors::maybe_spawn;
use crate::systems::populate::{populate, preserve_movers, regenerate_field};
use crate::systems::update::advance_populations;

/// The animated backdrop: surface, populations and pacing for one mounted view.
///
/// Owns all of its state; nothing is global. A host drives it with
/// [`Backdrop::frame`] from its animation-frame callback, forwards resize
/// events to [`Backdrop::request_resize`] and calls [`Backdrop::teardown`]
/// when the view goes away.
pub struct Backdrop {
    config: BackdropConfig,
    path: RenderPath,
    class: DeviceClass,
    surface: Surface,
    populations: Populations,
    rng: Rng,
    limiter: FrameLimiter,
    resize: Debouncer<FixedCapabilities>,
    draw_list: DrawList,
    passes: u64,
    regenerations: u64,
    torn_down: bool,
}

impl Backdrop {
    /// Size the surface, build the initial populations and draw them once.
    pub fn mount(config: BackdropConfig, caps: &dyn CapabilityQuery, seed: u64) -> Self {
        let path = RenderPath::select(caps);
        let class = DeviceClass::of(caps);
        let surface = Surface::from_viewport(caps.viewport(), config.max_pixel_ratio);
        let mut rng = Rng::new(seed);
        let populations = populate(&config, &surface, class, path, &mut rng);
        let limiter = FrameLimiter::new(config.target_fps);
        let resize = Debouncer::new(config.resize_debounce_ms);

        let mut backdrop = Self {
            config,
            path,
            class,
            surface,
            populations,
            rng,
            limiter,
            resize,
            draw_list: DrawList::new(),
            passes: 0,
            regenerations: 0,
            torn_down: false,
        };
        backdrop.render();

        let counts = backdrop.populations.counts();
        log::info!(
            "backdrop: mounted {}x{} @{}x, path {:?}, {} stars, {} particles, {} debris, \
             {} asteroids, {} satellites",
            backdrop.surface.width,
            backdrop.surface.height,
            backdrop.surface.pixel_ratio,
            path,
            counts.stars,
            counts.particles,
            counts.debris,
            counts.asteroids,
            counts.satellites,
        );
        backdrop
    }

    /// Recompute the surface from a viewport reading. Touches no population.
    pub fn resize_surface(&mut self, caps: &dyn CapabilityQuery) -> Surface {
        self.surface = Surface::from_viewport(caps.viewport(), self.config.max_pixel_ratio);
        self.surface
    }

    /// Animation-frame callback at host timestamp `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        if self.torn_down || !self.path.is_animated() {
            return FrameOutcome::Stopped;
        }
        if !self.limiter.accept(now_ms) {
            return FrameOutcome::Skipped;
        }
        self.step();
        FrameOutcome::Rendered
    }

    /// One full update-and-draw pass, independent of pacing.
    pub fn step(&mut self) {
        if self.torn_down {
            return;
        }
        let margin = self
            .config
            .meteors
            .as_ref()
            .map(|m| m.exit_margin)
            .unwrap_or(0.0);
        advance_populations(&mut self.populations, &self.surface, margin);
        self.render();

        if self.path.is_animated() {
            if let Some(params) = &self.config.meteors {
                maybe_spawn(
                    &mut self.populations.meteors,
                    params,
                    params.cap(self.class),
                    &self.surface,
                    &mut self.rng,
                );
            }
        }
        self.passes += 1;
    }

    /// Rebuild the draw list from the current state without advancing it.
    pub fn render(&mut self) {
        build_draw_list(
            &self.populations,
            &self.surface,
            &self.config,
            self.path,
            &mut self.draw_list,
        );
    }

    /// Record a resize event. Returns the time at which it becomes due, or
    /// `None` once torn down.
    pub fn request_resize(&mut self, now_ms: f64, caps: &dyn CapabilityQuery) -> Option<f64> {
        if self.torn_down {
            return None;
        }
        let snapshot = FixedCapabilities {
            viewport: caps.viewport(),
            reduced_motion: caps.prefers_reduced_motion(),
            compact: caps.is_compact(),
        };
        Some(self.resize.trigger(now_ms, snapshot))
    }

    /// Apply the pending resize if its quiet period is over.
    /// Returns the new surface when populations were regenerated.
    pub fn flush_resize(&mut self, now_ms: f64) -> Option<Surface> {
        if self.torn_down {
            return None;
        }
        let caps = self.resize.poll(now_ms)?;
        self.resize_surface(&caps);
        self.class = DeviceClass::of(&caps);
        // Reduced motion is fixed at mount; only Full <-> Simplified can change.
        if self.path.is_animated() {
            self.path = match self.class {
                DeviceClass::Compact => RenderPath::Simplified,
                DeviceClass::Desktop => RenderPath::Full,
            };
        }
        self.regenerate();
        self.render();
        Some(self.surface)
    }

    /// Rebuild populations for the current surface.
    fn regenerate(&mut self) {
        if self.config.preserve_movers_on_resize {
            preserve_movers(&mut self.populations, &self.surface);
            regenerate_field(
                &mut self.populations,
                &self.config,
                &self.surface,
                self.class,
                self.path,
                &mut self.rng,
            );
        } else {
            self.populations = populate(
                &self.config,
                &self.surface,
                self.class,
                self.path,
                &mut self.rng,
            );
        }
        self.regenerations += 1;
        log::debug!(
            "backdrop: regenerated for {}x{} ({} objects)",
            self.surface.width,
            self.surface.height,
            self.populations.len()
        );
    }

    /// Stop all further work. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.resize.cancel();
        self.draw_list.clear();
        log::info!("backdrop: torn down after {} passes", self.passes);
    }

    // -- Accessors --

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn path(&self) -> RenderPath {
        self.path
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn populations(&self) -> &Populations {
        &self.populations
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Number of update passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Number of resize-driven regenerations so far.
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Host time at which the pending resize becomes due.
    pub fn resize_deadline(&self) -> Option<f64> {
        self.resize.deadline()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::capabilities::Viewport;
    use crate::components::asteroid::Asteroid;
    use crate::components::point::PointObject;
    use crate::components::satellite::Satellite;
    use crate::renderer::layer::DrawLayer;
    use crate::systems::motion::wrap;

    fn desktop() -> FixedCapabilities {
        FixedCapabilities::desktop(1920.0, 1080.0)
    }

    #[test]
    fn mount_draws_initial_frame() {
        let b = Backdrop::mount(BackdropConfig::default(), &desktop(), 1);
        assert_eq!(b.path(), RenderPath::Full);
        assert!(!b.draw_list().is_empty());
        assert_eq!(b.populations().stars.len(), 30);
        assert_eq!(b.passes(), 0);
    }

    #[test]
    fn double_rate_callbacks_update_every_other_time() {
        let mut b = Backdrop::mount(BackdropConfig::default(), &desktop(), 1);
        let mut outcomes = Vec::new();
        for i in 0..=8 {
            let before = b.populations().clone();
            let outcome = b.frame(i as f64 * 25.0);
            if outcome == FrameOutcome::Skipped {
                assert_eq!(&before, b.populations(), "skipped frame mutated state");
            }
            outcomes.push(outcome);
        }
        let rendered = outcomes.iter().filter(|o| **o == FrameOutcome::Rendered).count();
        assert_eq!(rendered, 4);
        assert_eq!(b.passes(), 4);
        assert_eq!(outcomes[1], FrameOutcome::Skipped);
        assert_eq!(outcomes[2], FrameOutcome::Rendered);
    }

    #[test]
    fn teardown_freezes_populations() {
        let mut b = Backdrop::mount(BackdropConfig::default(), &desktop(), 5);
        assert_eq!(b.frame(100.0), FrameOutcome::Rendered);
        b.teardown();
        b.teardown();
        let frozen = b.populations().clone();
        for i in 0..20 {
            assert_eq!(b.frame(200.0 + i as f64 * 50.0), FrameOutcome::Stopped);
        }
        b.step();
        assert_eq!(&frozen, b.populations());
        assert_eq!(b.request_resize(0.0, &desktop()), None);
        assert_eq!(b.flush_resize(1e9), None);
        assert!(b.draw_list().is_empty());
    }

    #[test]
    fn resize_burst_regenerates_once_with_last_size() {
        let mut b = Backdrop::mount(BackdropConfig::default(), &desktop(), 9);
        for i in 0..10 {
            let caps = FixedCapabilities::desktop(800.0 + i as f32 * 10.0, 600.0);
            b.request_resize(i as f64 * 20.0, &caps);
            assert_eq!(b.flush_resize(i as f64 * 20.0 + 1.0), None);
        }
        assert!(b.resize_pending());
        assert_eq!(b.resize_deadline(), Some(480.0));
        let surface = b.flush_resize(180.0 + 300.0).expect("resize due");
        assert_eq!(surface.width, 890.0);
        assert_eq!(surface.height, 600.0);
        assert_eq!(b.regenerations(), 1);
        assert_eq!(b.flush_resize(10_000.0), None);
        assert_eq!(b.regenerations(), 1);
        // 890 * 600 / 30000 = 17.8
        assert_eq!(b.populations().stars.len(), 17);
    }

    #[test]
    fn resize_to_compact_switches_path() {
        let mut b = Backdrop::mount(BackdropConfig::default(), &desktop(), 9);
        let phone = FixedCapabilities::compact(390.0, 844.0);
        b.request_resize(0.0, &phone);
        b.flush_resize(300.0);
        assert_eq!(b.path(), RenderPath::Simplified);
        assert!(b.populations().nebula.is_none());
    }

    fn with_live_meteor(preserve: bool) -> Backdrop {
        let mut config = BackdropConfig {
            preserve_movers_on_resize: preserve,
            ..BackdropConfig::default()
        };
        if let Some(m) = config.meteors.as_mut() {
            m.spawn_chance = 1.0;
        }
        let mut b = Backdrop::mount(config, &desktop(), 4);
        b.step();
        assert_eq!(b.populations().meteors.len(), 1);
        b
    }

    #[test]
    fn resize_keeps_movers_and_rewraps_them() {
        let mut b = with_live_meteor(true);
        let before = b.populations().clone();
        assert!(!before.debris.is_empty());
        assert!(!before.asteroids.is_empty());
        assert!(!before.satellites.is_empty());

        b.request_resize(0.0, &FixedCapabilities::desktop(640.0, 480.0));
        b.flush_resize(300.0).expect("resize due");
        let after = b.populations();
        let (w, h) = (640.0, 480.0);

        assert_eq!(after.debris.len(), before.debris.len());
        for (old, new) in before.debris.iter().zip(&after.debris) {
            let expected = PointObject {
                pos: wrap(old.pos, w, h),
                ..old.clone()
            };
            assert_eq!(new, &expected);
        }
        assert_eq!(after.asteroids.len(), before.asteroids.len());
        for (old, new) in before.asteroids.iter().zip(&after.asteroids) {
            let expected = Asteroid {
                pos: wrap(old.pos, w, h),
                ..old.clone()
            };
            assert_eq!(new, &expected);
        }
        assert_eq!(after.satellites.len(), before.satellites.len());
        for (old, new) in before.satellites.iter().zip(&after.satellites) {
            let expected = Satellite {
                pos: wrap(old.pos, w, h),
                ..old.clone()
            };
            assert_eq!(new, &expected);
        }
        assert_eq!(after.meteors, before.meteors);
    }

    #[test]
    fn resize_without_preserve_rebuilds_everything() {
        let mut b = with_live_meteor(false);
        b.request_resize(0.0, &FixedCapabilities::desktop(640.0, 480.0));
        b.flush_resize(300.0).expect("resize due");
        assert!(b.populations().meteors.is_empty());
        // 640 * 480 / 400000 = 0.77
        assert!(b.populations().satellites.is_empty());
    }

    #[test]
    fn reduced_motion_is_static() {
        let caps = desktop().with_reduced_motion(true);
        let mut b = Backdrop::mount(BackdropConfig::default(), &caps, 2);
        assert_eq!(b.path(), RenderPath::Static);
        assert!(!b.draw_list().is_empty());
        let before = b.populations().clone();
        assert_eq!(b.frame(1000.0), FrameOutcome::Stopped);
        assert_eq!(&before, b.populations());
        assert_eq!(b.passes(), 0);
    }

    #[test]
    fn meteors_eventually_spawn_and_never_exceed_cap() {
        let mut config = BackdropConfig::default();
        if let Some(m) = config.meteors.as_mut() {
            m.spawn_chance = 0.5;
        }
        let mut b = Backdrop::mount(config, &desktop(), 21);
        let mut seen = false;
        for _ in 0..400 {
            b.step();
            let live = b.populations().meteors.len();
            assert!(live <= 3);
            seen |= live > 0;
            assert!(b
                .draw_list()
                .layer(DrawLayer::Meteors)
                .iter()
                .all(|c| c.alpha() > 0.0));
        }
        assert!(seen);
    }

    #[test]
    fn zero_sized_viewport_is_harmless() {
        let caps =
            FixedCapabilities::desktop(0.0, 0.0).with_viewport(Viewport::new(0.0, 0.0, 2.0));
        let mut b = Backdrop::mount(BackdropConfig::default(), &caps, 1);
        assert!(b.populations().is_empty());
        b.step();
        assert!(b.draw_list().is_empty());
    }

    #[test]
    fn resize_surface_needs_no_populations() {
        let mut config = BackdropConfig::default();
        config.stars = None;
        config.particles = None;
        let mut b = Backdrop::mount(config, &desktop(), 1);
        let caps = FixedCapabilities::desktop(300.0, 200.0)
            .with_viewport(Viewport::new(300.0, 200.0, 3.0));
        let s = b.resize_surface(&caps);
        assert_eq!(s.backing_width, 600);
        assert_eq!(b.surface().width, 300.0);
    }
}
