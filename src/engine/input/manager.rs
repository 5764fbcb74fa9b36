// Input manager - turns winit keyboard events into per-frame snapshots

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::player::PlayerInput;
use super::snapshot::InputSnapshot;
use log::debug;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Coordinates key bindings and held-action state for the local player
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
    /// Bound keys currently held down
    held_sources: HashSet<InputSource>,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
            held_sources: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Key repeats carry no new information
            if event.repeat {
                return;
            }
            self.process_key(key_code, event.state == ElementState::Pressed);
        }
    }

    /// Apply a key transition
    pub fn process_key(&mut self, key_code: KeyCode, pressed: bool) {
        let source = InputSource::key(key_code);
        let Some(action) = self.config.get_action(source) else {
            return;
        };

        if pressed {
            self.held_sources.insert(source);
            self.player.press(action);
        } else {
            self.held_sources.remove(&source);
            // Another key bound to the same action may still be down
            if !self.action_still_held(action) {
                self.player.release(action);
            }
        }
        debug!("{:?} {:?} -> {:?}", key_code, pressed, action);
    }

    fn action_still_held(&self, action: Action) -> bool {
        self.held_sources
            .iter()
            .any(|source| self.config.get_action(*source) == Some(action))
    }

    /// Snapshot for this frame, then roll the per-frame state over
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let snapshot = self.player.snapshot();
        self.player.update();
        snapshot
    }

    /// Drop all held keys (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.held_sources.clear();
        self.player.reset();
    }
}
