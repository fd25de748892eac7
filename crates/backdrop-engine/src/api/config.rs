use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::capabilities::DeviceClass;
use crate::api::types::{BackdropError, Rgb};

/// Backdrop tuning, provided by the host or loaded from JSON.
///
/// Every kind block is optional: `null` disables that kind. Missing top-level
/// keys fall back to the defaults below; a kind block, once given, must be complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Maximum update passes per second (default: 20).
    pub target_fps: f32,
    /// Quiet period before a resize regenerates populations (default: 300ms).
    pub resize_debounce_ms: f64,
    /// Cap on the device pixel ratio used for the backing buffer (default: 2).
    pub max_pixel_ratio: f32,
    /// Viewports narrower than this (CSS px) count as compact (default: 768).
    pub compact_breakpoint: f32,
    /// How each pass starts: full clear or a translucent fade for trails.
    pub clear_mode: ClearMode,
    /// Keep satellites, asteroids, debris and live meteors across a resize.
    pub preserve_movers_on_resize: bool,
    pub stars: Option<PointParams>,
    pub particles: Option<PointParams>,
    pub debris: Option<PointParams>,
    pub asteroids: Option<AsteroidParams>,
    pub satellites: Option<SatelliteParams>,
    pub meteors: Option<MeteorParams>,
    pub nebula: Option<NebulaParams>,
    /// Lines between nearby particles. Off by default.
    pub connections: Option<ConnectionParams>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            target_fps: 20.0,
            resize_debounce_ms: 300.0,
            max_pixel_ratio: 2.0,
            compact_breakpoint: 768.0,
            clear_mode: ClearMode::Clear,
            preserve_movers_on_resize: true,
            stars: Some(PointParams::stars()),
            particles: Some(PointParams::particles()),
            debris: Some(PointParams::debris()),
            asteroids: Some(AsteroidParams::default()),
            satellites: Some(SatelliteParams::default()),
            meteors: Some(MeteorParams::default()),
            nebula: Some(NebulaParams::default()),
            connections: None,
        }
    }
}

impl BackdropConfig {
    /// Parse and validate a config document.
    pub fn from_json(json: &str) -> Result<Self, BackdropError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tuning that would break the simulation invariants.
    pub fn validate(&self) -> Result<(), BackdropError> {
        positive("target_fps", self.target_fps)?;
        if !(self.resize_debounce_ms.is_finite() && self.resize_debounce_ms >= 0.0) {
            return Err(BackdropError::invalid(
                "resize_debounce_ms",
                "must be a non-negative number",
            ));
        }
        if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio >= 1.0) {
            return Err(BackdropError::invalid("max_pixel_ratio", "must be at least 1"));
        }
        non_negative("compact_breakpoint", self.compact_breakpoint)?;
        if let ClearMode::Fade { alpha, .. } = self.clear_mode {
            unit("clear_mode.fade.alpha", [alpha, alpha])?;
        }
        if let Some(p) = &self.stars {
            p.validate("stars")?;
        }
        if let Some(p) = &self.particles {
            p.validate("particles")?;
        }
        if let Some(p) = &self.debris {
            p.validate("debris")?;
        }
        if let Some(p) = &self.asteroids {
            p.validate()?;
        }
        if let Some(p) = &self.satellites {
            p.validate()?;
        }
        if let Some(p) = &self.meteors {
            p.validate()?;
        }
        if let Some(p) = &self.nebula {
            p.validate()?;
        }
        if let Some(p) = &self.connections {
            p.validate()?;
        }
        Ok(())
    }
}

/// How the surface is prepared at the start of each pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearMode {
    /// Clear to transparent.
    Clear,
    /// Paint a translucent rectangle, leaving fading trails.
    Fade {
        alpha: f32,
        #[serde(default = "fade_color")]
        color: Rgb,
    },
}

fn fade_color() -> Rgb {
    Rgb::BLACK
}

/// Population sizing shared by every pre-populated kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density {
    /// Square CSS pixels per object.
    pub per_px2: f32,
    /// Upper bound on desktop-class viewports.
    pub cap_desktop: usize,
    /// Upper bound on compact viewports.
    pub cap_compact: usize,
}

impl Density {
    pub fn new(per_px2: f32, cap_desktop: usize, cap_compact: usize) -> Self {
        Self {
            per_px2,
            cap_desktop,
            cap_compact,
        }
    }

    pub fn cap(&self, class: DeviceClass) -> usize {
        match class {
            DeviceClass::Desktop => self.cap_desktop,
            DeviceClass::Compact => self.cap_compact,
        }
    }

    fn validate(&self, kind: &str) -> Result<(), BackdropError> {
        positive(&format!("{}.density.per_px2", kind), self.per_px2)
    }
}

/// Stars, drifting particles and debris fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointParams {
    pub density: Density,
    /// Velocity components are uniform in [-speed, speed] px per pass.
    pub speed: f32,
    /// Radius range in px.
    pub size: [f32; 2],
    /// Base opacity range, within [0, 1].
    pub opacity: [f32; 2],
    /// Phase advance per pass, radians.
    pub phase_speed: [f32; 2],
    /// Brightness floor and ceiling the sine modulation cycles between.
    pub modulation: [f32; 2],
    pub palette: Vec<Rgb>,
}

impl PointParams {
    /// Static twinkling stars.
    pub fn stars() -> Self {
        Self {
            density: Density::new(30_000.0, 30, 15),
            speed: 0.0,
            size: [0.3, 0.9],
            opacity: [0.2, 0.6],
            phase_speed: [0.05, 0.15],
            modulation: [0.8, 1.0],
            palette: vec![Rgb::WHITE],
        }
    }

    /// Slow colored drifters.
    pub fn particles() -> Self {
        Self {
            density: Density::new(50_000.0, 15, 8),
            speed: 0.04,
            size: [0.5, 1.5],
            opacity: [0.2, 0.5],
            phase_speed: [0.005, 0.01],
            modulation: [0.9, 1.0],
            palette: vec![
                Rgb::new(0x3B, 0x82, 0xF6),
                Rgb::new(0x06, 0xB6, 0xD4),
                Rgb::new(0x8B, 0x5C, 0xF6),
                Rgb::new(0x10, 0xB9, 0x81),
            ],
        }
    }

    /// Dim grey fragments.
    pub fn debris() -> Self {
        Self {
            density: Density::new(80_000.0, 12, 5),
            speed: 0.2,
            size: [0.4, 1.2],
            opacity: [0.15, 0.4],
            phase_speed: [0.02, 0.05],
            modulation: [0.6, 1.0],
            palette: vec![Rgb::new(0x94, 0xA3, 0xB8), Rgb::new(0x64, 0x74, 0x8B)],
        }
    }

    fn validate(&self, kind: &str) -> Result<(), BackdropError> {
        self.density.validate(kind)?;
        non_negative(&format!("{}.speed", kind), self.speed)?;
        ordered(&format!("{}.size", kind), self.size)?;
        unit(&format!("{}.opacity", kind), self.opacity)?;
        ordered(&format!("{}.phase_speed", kind), self.phase_speed)?;
        unit(&format!("{}.modulation", kind), self.modulation)?;
        if self.palette.is_empty() {
            return Err(BackdropError::invalid(
                format!("{}.palette", kind),
                "needs at least one color",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidParams {
    pub density: Density,
    pub speed: f32,
    /// Mean radius range in px.
    pub size: [f32; 2],
    pub opacity: [f32; 2],
    /// Rotation speed is uniform in [-spin, spin] radians per pass.
    pub spin: f32,
    /// Outline vertex count.
    pub vertices: usize,
    /// Per-vertex radius jitter: factors in [1 - roughness, 1 + roughness].
    pub roughness: f32,
    pub color: Rgb,
}

impl Default for AsteroidParams {
    fn default() -> Self {
        Self {
            density: Density::new(250_000.0, 5, 2),
            speed: 0.15,
            size: [3.0, 7.0],
            opacity: [0.3, 0.6],
            spin: 0.01,
            vertices: 7,
            roughness: 0.3,
            color: Rgb::new(0x78, 0x71, 0x6C),
        }
    }
}

impl AsteroidParams {
    fn validate(&self) -> Result<(), BackdropError> {
        self.density.validate("asteroids")?;
        non_negative("asteroids.speed", self.speed)?;
        ordered("asteroids.size", self.size)?;
        unit("asteroids.opacity", self.opacity)?;
        non_negative("asteroids.spin", self.spin)?;
        if self.vertices < 3 {
            return Err(BackdropError::invalid("asteroids.vertices", "needs at least 3"));
        }
        if !(0.0..1.0).contains(&self.roughness) {
            return Err(BackdropError::invalid("asteroids.roughness", "must be in [0, 1)"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteParams {
    pub density: Density,
    pub speed: f32,
    /// Body half-size range in px.
    pub size: [f32; 2],
    pub opacity: [f32; 2],
    /// Beacon blink phase advance per pass, radians.
    pub blink_speed: [f32; 2],
    /// Beacon brightness floor and ceiling.
    pub blink: [f32; 2],
    /// Rotation speed is uniform in [-spin, spin] radians per pass.
    pub spin: f32,
    pub body_color: Rgb,
    pub panel_color: Rgb,
    pub beacon_color: Rgb,
}

impl Default for SatelliteParams {
    fn default() -> Self {
        Self {
            density: Density::new(400_000.0, 3, 1),
            speed: 0.3,
            size: [2.0, 3.0],
            opacity: [0.5, 0.8],
            blink_speed: [0.08, 0.15],
            blink: [0.2, 1.0],
            spin: 0.005,
            body_color: Rgb::new(0xCB, 0xD5, 0xE1),
            panel_color: Rgb::new(0x3B, 0x82, 0xF6),
            beacon_color: Rgb::new(0xEF, 0x44, 0x44),
        }
    }
}

impl SatelliteParams {
    fn validate(&self) -> Result<(), BackdropError> {
        self.density.validate("satellites")?;
        non_negative("satellites.speed", self.speed)?;
        ordered("satellites.size", self.size)?;
        unit("satellites.opacity", self.opacity)?;
        ordered("satellites.blink_speed", self.blink_speed)?;
        unit("satellites.blink", self.blink)?;
        non_negative("satellites.spin", self.spin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteorParams {
    /// Probability of a spawn attempt succeeding on any pass.
    pub spawn_chance: f32,
    /// Live meteor cap on the full path.
    pub cap_desktop: usize,
    /// Live meteor cap on the simplified path.
    pub cap_compact: usize,
    /// Fixed velocity, px per pass. Downward diagonal.
    pub velocity: Vec2,
    /// Trail length range in px.
    pub trail_len: [f32; 2],
    /// Opacity lost per pass.
    pub decay: f32,
    /// Spawns land in the top `spawn_band` fraction of the surface.
    pub spawn_band: f32,
    /// Distance past the surface edge at which a meteor is culled.
    pub exit_margin: f32,
    pub width: f32,
    pub color: Rgb,
}

impl Default for MeteorParams {
    fn default() -> Self {
        Self {
            spawn_chance: 0.01,
            cap_desktop: 3,
            cap_compact: 1,
            velocity: Vec2::new(6.0, 3.0),
            trail_len: [40.0, 80.0],
            decay: 0.015,
            spawn_band: 0.3,
            exit_margin: 100.0,
            width: 1.5,
            color: Rgb::WHITE,
        }
    }
}

impl MeteorParams {
    pub fn cap(&self, class: DeviceClass) -> usize {
        match class {
            DeviceClass::Desktop => self.cap_desktop,
            DeviceClass::Compact => self.cap_compact,
        }
    }

    fn validate(&self) -> Result<(), BackdropError> {
        unit("meteors.spawn_chance", [self.spawn_chance, self.spawn_chance])?;
        ordered("meteors.trail_len", self.trail_len)?;
        positive("meteors.decay", self.decay)?;
        unit("meteors.spawn_band", [self.spawn_band, self.spawn_band])?;
        non_negative("meteors.exit_margin", self.exit_margin)?;
        non_negative("meteors.width", self.width)?;
        if !(self.velocity.is_finite() && self.velocity.y > 0.0) {
            return Err(BackdropError::invalid("meteors.velocity", "must point downward"));
        }
        Ok(())
    }
}

/// The slow background glow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NebulaParams {
    /// Top-left of the glow's bounding box, as a fraction of the surface.
    pub anchor: Vec2,
    /// Radius in px.
    pub radius: f32,
    /// Opacity floor and ceiling over one breathing cycle.
    pub opacity: [f32; 2],
    /// Peak relative growth of the radius over one cycle.
    pub scale_amplitude: f32,
    /// Phase advance per pass, radians.
    pub phase_speed: f32,
    /// Gradient stops from center outwards.
    pub colors: Vec<Rgb>,
}

impl Default for NebulaParams {
    fn default() -> Self {
        Self {
            anchor: Vec2::new(0.25, 0.25),
            radius: 192.0,
            opacity: [0.02, 0.04],
            scale_amplitude: 0.01,
            // One cycle per 60s at 20 passes/s.
            phase_speed: std::f32::consts::TAU / 1200.0,
            colors: vec![
                Rgb::new(0x3B, 0x82, 0xF6),
                Rgb::new(0xA8, 0x55, 0xF7),
                Rgb::new(0x06, 0xB6, 0xD4),
            ],
        }
    }
}

impl NebulaParams {
    fn validate(&self) -> Result<(), BackdropError> {
        positive("nebula.radius", self.radius)?;
        unit("nebula.opacity", self.opacity)?;
        non_negative("nebula.scale_amplitude", self.scale_amplitude)?;
        non_negative("nebula.phase_speed", self.phase_speed)?;
        if self.colors.is_empty() {
            return Err(BackdropError::invalid("nebula.colors", "needs at least one color"));
        }
        Ok(())
    }
}

/// Lines drawn between particles closer than `link_distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub link_distance: f32,
    /// Alpha of a zero-length link; fades linearly to 0 at `link_distance`.
    pub max_alpha: f32,
    pub width: f32,
    pub color: Rgb,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            link_distance: 120.0,
            max_alpha: 0.15,
            width: 0.5,
            color: Rgb::new(0x3B, 0x82, 0xF6),
        }
    }
}

impl ConnectionParams {
    fn validate(&self) -> Result<(), BackdropError> {
        positive("connections.link_distance", self.link_distance)?;
        unit("connections.max_alpha", [self.max_alpha, self.max_alpha])?;
        non_negative("connections.width", self.width)
    }
}

fn positive(field: &str, v: f32) -> Result<(), BackdropError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(BackdropError::invalid(field, "must be positive"))
    }
}

fn non_negative(field: &str, v: f32) -> Result<(), BackdropError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(BackdropError::invalid(field, "must be non-negative"))
    }
}

fn ordered(field: &str, [min, max]: [f32; 2]) -> Result<(), BackdropError> {
    if min.is_finite() && max.is_finite() && min >= 0.0 && min <= max {
        Ok(())
    } else {
        Err(BackdropError::invalid(field, "expected [min, max] with 0 <= min <= max"))
    }
}

fn unit(field: &str, range: [f32; 2]) -> Result<(), BackdropError> {
    ordered(field, range)?;
    if range[1] <= 1.0 {
        Ok(())
    } else {
        Err(BackdropError::invalid(field, "must lie within [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        BackdropConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_document_gives_defaults() {
        let config = BackdropConfig::from_json("{}").unwrap();
        assert_eq!(config, BackdropConfig::default());
    }

    #[test]
    fn null_disables_a_kind() {
        let config = BackdropConfig::from_json(r#"{"meteors": null, "target_fps": 30}"#).unwrap();
        assert!(config.meteors.is_none());
        assert!(config.stars.is_some());
        assert_eq!(config.target_fps, 30.0);
    }

    #[test]
    fn fade_mode_parses() {
        let config = BackdropConfig::from_json(
            r##"{"clear_mode": {"fade": {"alpha": 0.25, "color": "#000000"}}}"##,
        )
        .unwrap();
        assert_eq!(
            config.clear_mode,
            ClearMode::Fade {
                alpha: 0.25,
                color: Rgb::BLACK
            }
        );
    }

    #[test]
    fn fade_color_defaults_to_black() {
        let config =
            BackdropConfig::from_json(r#"{"clear_mode": {"fade": {"alpha": 0.1}}}"#).unwrap();
        assert_eq!(
            config.clear_mode,
            ClearMode::Fade {
                alpha: 0.1,
                color: Rgb::BLACK
            }
        );
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = BackdropConfig::default();
        config.connections = Some(ConnectionParams::default());
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(BackdropConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn rejects_zero_density() {
        let mut config = BackdropConfig::default();
        if let Some(stars) = config.stars.as_mut() {
            stars.density.per_px2 = 0.0;
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("stars.density.per_px2"), "{}", err);
    }

    #[test]
    fn rejects_opacity_above_one() {
        let mut config = BackdropConfig::default();
        if let Some(particles) = config.particles.as_mut() {
            particles.opacity = [0.5, 1.5];
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("particles.opacity"), "{}", err);
    }

    #[test]
    fn rejects_inverted_range() {
        let mut config = BackdropConfig::default();
        if let Some(sats) = config.satellites.as_mut() {
            sats.size = [3.0, 2.0];
        }
        assert!(matches!(
            config.validate(),
            Err(BackdropError::InvalidConfig { field, .. }) if field == "satellites.size"
        ));
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(
            BackdropConfig::from_json("{not json"),
            Err(BackdropError::Config(_))
        ));
    }

    #[test]
    fn zero_fps_rejected() {
        let err = BackdropConfig::from_json(r#"{"target_fps": 0}"#).unwrap_err();
        assert!(err.to_string().contains("target_fps"));
    }

    #[test]
    fn caps_by_device_class() {
        let d = Density::new(1000.0, 30, 15);
        assert_eq!(d.cap(DeviceClass::Desktop), 30);
        assert_eq!(d.cap(DeviceClass::Compact), 15);
    }
}
