// Actor system
//
// This module contains everything the level's actors need:
// - Animation registry and per-actor playback
// - Player state machine and controller
// - Patrol controller for autonomous enemies
// - Tuning constants and the commands sent back to the host

pub mod animation;
pub mod commands;
pub mod patrol;
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationRegistry, RegistryError};
pub use commands::{ActorId, Command, DeferredAction, HostCommand};
pub use patrol::{ContactSource, PatrolController};
pub use player::{PlayerController, PlayerSignals};
pub use stats::{PatrolStats, PlayerStats, WorldConfig};
