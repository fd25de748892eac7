/// Host viewport reading, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Capability query injected by the host.
///
/// The engine never inspects the environment itself; the web bridge implements
/// this over `window`, tests use [`FixedCapabilities`].
pub trait CapabilityQuery {
    /// Current viewport size and device pixel ratio.
    fn viewport(&self) -> Viewport;

    /// The user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Small / narrow screen: use the lower population caps.
    fn is_compact(&self) -> bool;
}

/// Which rendering path the backdrop takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Every configured kind, continuously animated.
    Full,
    /// Compact caps, no nebula or connections, fewer meteors.
    Simplified,
    /// Populations drawn once; no frame loop.
    Static,
}

impl RenderPath {
    /// Reduced motion wins over a compact viewport.
    pub fn select(caps: &dyn CapabilityQuery) -> Self {
        if caps.prefers_reduced_motion() {
            RenderPath::Static
        } else if caps.is_compact() {
            RenderPath::Simplified
        } else {
            RenderPath::Full
        }
    }

    /// Whether a frame loop should be scheduled at all.
    pub fn is_animated(self) -> bool {
        self != RenderPath::Static
    }
}

/// Device class used for population caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Compact,
}

impl DeviceClass {
    pub fn of(caps: &dyn CapabilityQuery) -> Self {
        if caps.is_compact() {
            DeviceClass::Compact
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Capability values fixed at construction. Used by tests and headless hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCapabilities {
    pub viewport: Viewport,
    pub reduced_motion: bool,
    pub compact: bool,
}

impl FixedCapabilities {
    pub fn desktop(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height, 1.0),
            reduced_motion: false,
            compact: false,
        }
    }

    pub fn compact(width: f32, height: f32) -> Self {
        Self {
            compact: true,
            ..Self::desktop(width, height)
        }
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}

impl CapabilityQuery for FixedCapabilities {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn is_compact(&self) -> bool {
        self.compact
    }
}
