// Game layer: actors, the level scene and the demo host

pub mod actors;
pub mod host;
pub mod scene;

pub use host::DemoHost;
pub use scene::{Scene, SceneConfig};
