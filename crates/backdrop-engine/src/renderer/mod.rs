pub mod draw_list;
pub mod layer;
pub mod traits;

// Re-export key types for convenient access
pub use draw_list::{DrawCommand, DrawList};
pub use layer::DrawLayer;
pub use traits::{replay, DrawTarget, RecordingTarget};
