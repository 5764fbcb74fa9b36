// Key binding configuration and remapping

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys) to game actions.
/// Several keys may drive the same action; a key drives at most one.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// An empty configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// The cursor-key layout
    pub fn with_defaults() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind an input source to an action, replacing whatever it drove before
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_defaults_use_cursor_keys() {
        let config = InputConfig::with_defaults();
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::ArrowLeft)),
            Some(Action::MoveLeft)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::ArrowUp)),
            Some(Action::Jump)
        );
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyA)), None);
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::with_defaults();
        let key = InputSource::key(KeyCode::ArrowLeft);
        config.bind(key, Action::MoveRight);

        assert_eq!(config.get_action(key), Some(Action::MoveRight));
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::ArrowRight)),
            Some(Action::MoveRight)
        );
    }

    #[test]
    fn test_multiple_sources_per_action() {
        let mut config = InputConfig::with_defaults();
        config.bind(InputSource::key(KeyCode::Space), Action::Jump);

        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Space)),
            Some(Action::Jump)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::ArrowUp)),
            Some(Action::Jump)
        );
    }

    #[test]
    fn test_from_bindings_last_wins() {
        let key = InputSource::key(KeyCode::KeyW);
        let config = InputConfig::from_bindings(vec![(key, Action::Jump), (key, Action::MoveLeft)]);
        assert_eq!(config.get_action(key), Some(Action::MoveLeft));
        assert_eq!(InputConfig::new().get_action(key), None);
    }
}
