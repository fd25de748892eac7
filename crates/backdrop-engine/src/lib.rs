pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::backdrop::Backdrop;
pub use api::capabilities::{CapabilityQuery, DeviceClass, FixedCapabilities, RenderPath, Viewport};
pub use api::config::{
    AsteroidParams, BackdropConfig, ClearMode, ConnectionParams, Density, MeteorParams,
    NebulaParams, PointParams, SatelliteParams,
};
pub use api::types::{BackdropError, FrameOutcome, Rgb};
pub use components::asteroid::Asteroid;
pub use components::meteor::Meteor;
pub use components::nebula::Nebula;
pub use components::point::PointObject;
pub use components::satellite::Satellite;
pub use crate::core::debounce::Debouncer;
pub use crate::core::populations::{PopulationCounts, Populations};
pub use crate::core::rng::Rng;
pub use crate::core::surface::Surface;
pub use crate::core::time::FrameLimiter;
pub use renderer::{replay, DrawCommand, DrawLayer, DrawList, DrawTarget, RecordingTarget};
