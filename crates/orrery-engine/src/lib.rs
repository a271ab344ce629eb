pub mod api;
pub mod camera;
pub mod core;
pub mod input;
pub mod snapshot;

// Re-export key types at crate root for convenience
pub use api::game::{DataChannel, EngineContext, Game, GameConfig};
pub use api::types::{BodyId, GameEvent};
pub use camera::{OrbitCamera, Projection, Ray};
pub use core::body::{Body, BodyKind, RingInfo};
pub use core::registry::Registry;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use snapshot::{BodyInstance, SnapshotBuffer};
