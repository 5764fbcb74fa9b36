// Input handling system
//
// Keyboard events from winit are mapped through the key bindings onto game
// actions; once per fixed step the held actions are frozen into an
// `InputSnapshot` for the player controller.
//
// - `action`: game actions and default key bindings
// - `config`: rebindable key configuration
// - `player`: held-action state
// - `snapshot`: the per-frame value handed to the game layer
// - `manager`: ties the above together

pub mod action;
pub mod config;
pub mod manager;
pub mod player;
pub mod snapshot;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use snapshot::InputSnapshot;
