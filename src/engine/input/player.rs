// Held-action state for the local player

use super::action::Action;
use super::snapshot::InputSnapshot;
use std::collections::HashSet;

/// Tracks which actions are held and which were pressed this frame
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions pressed since the last `update`
    just_pressed: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed since the last frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Call once per frame after the snapshot has been taken
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }

    /// The directional keys held right now.
    ///
    /// A press and release inside the same frame still counts, so quick taps
    /// are not lost between fixed steps.
    pub fn snapshot(&self) -> InputSnapshot {
        let held = |action| self.is_pressed(action) || self.just_pressed(action);
        InputSnapshot {
            left: held(Action::MoveLeft),
            right: held(Action::MoveRight),
            up: held(Action::Jump),
        }
    }
}
