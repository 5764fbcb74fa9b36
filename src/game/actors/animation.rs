// Actor animation registry and playback

use log::debug;
use std::collections::HashMap;

/// Keys of the animations every scene registers at startup
pub mod keys {
    pub const PLAYER_IDLE: &str = "player-idle";
    pub const PLAYER_WALK: &str = "player-walk";
    pub const PLAYER_JUMP: &str = "player-jump";
    pub const PLAYER_DEAD: &str = "player-dead";
    pub const PATROL_WALK: &str = "patrol-walk";
    pub const MYSTERY_BLOCK: &str = "mystery-block";
}

/// Frame rate used when an animation does not specify one
pub const DEFAULT_FRAME_RATE: f32 = 24.0;

/// Errors raised while building or querying the registry.
/// Both are configuration mistakes and should abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Animation already registered: {0}")]
    DuplicateKey(String),

    #[error("Unknown animation: {0}")]
    UnknownKey(String),
}

/// How many extra times an animation plays after the first cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Play the cycle once, then `n` more times
    Times(u32),
    /// Loop until another animation is requested
    Forever,
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Times(0)
    }
}

/// A named, immutable playback definition
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    /// Unique key within a registry
    pub key: String,
    /// Sprite sheet frame indices, in playback order
    pub frames: Vec<u32>,
    /// Frames per second
    pub frame_rate: f32,
    pub repeat: Repeat,
}

impl AnimationSpec {
    pub fn new(key: &str, frames: Vec<u32>, frame_rate: f32, repeat: Repeat) -> Self {
        Self {
            key: key.to_string(),
            frames,
            frame_rate,
            repeat,
        }
    }

    /// A static single-frame animation
    pub fn single_frame(key: &str, frame: u32) -> Self {
        Self::new(key, vec![frame], DEFAULT_FRAME_RATE, Repeat::default())
    }

    /// Inclusive frame range. Runs backwards when `start > end`.
    pub fn frame_range(start: u32, end: u32) -> Vec<u32> {
        if start <= end {
            (start..=end).collect()
        } else {
            (end..=start).rev().collect()
        }
    }

    /// Seconds each frame stays on screen
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate
    }
}

/// Table of every animation known to a scene.
///
/// Filled once during scene creation; read-only afterwards.
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    specs: HashMap<String, AnimationSpec>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }

    /// Build a registry holding the standard actor and prop animations
    pub fn standard() -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        registry.register(
            keys::PLAYER_WALK,
            AnimationSpec::frame_range(3, 1),
            8.0,
            Repeat::Forever,
        )?;
        registry.register_spec(AnimationSpec::single_frame(keys::PLAYER_IDLE, 0))?;
        registry.register_spec(AnimationSpec::single_frame(keys::PLAYER_JUMP, 5))?;
        registry.register_spec(AnimationSpec::single_frame(keys::PLAYER_DEAD, 4))?;
        registry.register(
            keys::PATROL_WALK,
            AnimationSpec::frame_range(0, 1),
            4.0,
            Repeat::default(),
        )?;
        registry.register(
            keys::MYSTERY_BLOCK,
            AnimationSpec::frame_range(0, 1),
            10.0,
            Repeat::Forever,
        )?;

        Ok(registry)
    }

    /// Register a new animation under `key`
    pub fn register(
        &mut self,
        key: &str,
        frames: Vec<u32>,
        frame_rate: f32,
        repeat: Repeat,
    ) -> Result<(), RegistryError> {
        self.register_spec(AnimationSpec::new(key, frames, frame_rate, repeat))
    }

    /// Register a prebuilt spec
    pub fn register_spec(&mut self, spec: AnimationSpec) -> Result<(), RegistryError> {
        if self.specs.contains_key(&spec.key) {
            return Err(RegistryError::DuplicateKey(spec.key));
        }

        debug!(
            "Registered animation '{}' ({} frames @ {} fps)",
            spec.key,
            spec.frames.len(),
            spec.frame_rate
        );
        self.specs.insert(spec.key.clone(), spec);
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Result<&AnimationSpec, RegistryError> {
        self.specs
            .get(key)
            .ok_or_else(|| RegistryError::UnknownKey(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }
}

/// Playback state of a single actor's animation.
///
/// Holds only a key into the registry; the spec itself stays owned by the
/// registry.
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    /// Currently selected animation key
    current: Option<String>,
    /// Position within the spec's frame list
    frame_cursor: usize,
    /// Time elapsed on the current frame
    frame_timer: f32,
    /// Completed passes over the frame list
    cycles_completed: u32,
    playing: bool,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `key` unless it is already playing.
    ///
    /// Returns `Ok(true)` when playback (re)started and `Ok(false)` when the
    /// request was a no-op. A finite animation that has finished counts as
    /// not playing and starts over.
    pub fn play(&mut self, registry: &AnimationRegistry, key: &str) -> Result<bool, RegistryError> {
        registry.lookup(key)?;

        if self.playing && self.current.as_deref() == Some(key) {
            return Ok(false);
        }

        self.restart(key);
        Ok(true)
    }

    fn restart(&mut self, key: &str) {
        debug!("Animation -> '{}'", key);
        self.current = Some(key.to_string());
        self.frame_cursor = 0;
        self.frame_timer = 0.0;
        self.cycles_completed = 0;
        self.playing = true;
    }

    /// Advance playback by `dt` seconds
    pub fn update(&mut self, registry: &AnimationRegistry, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(spec) = self.current.as_deref().and_then(|key| registry.lookup(key).ok()) else {
            return;
        };

        if spec.frames.is_empty() || spec.frame_rate <= 0.0 {
            return;
        }

        let frame_duration = spec.frame_duration();
        self.frame_timer += dt;

        while self.frame_timer >= frame_duration {
            self.frame_timer -= frame_duration;
            self.frame_cursor += 1;

            if self.frame_cursor < spec.frames.len() {
                continue;
            }

            self.cycles_completed += 1;
            let another_cycle = match spec.repeat {
                Repeat::Forever => true,
                Repeat::Times(extra) => self.cycles_completed <= extra,
            };

            if another_cycle {
                self.frame_cursor = 0;
            } else {
                // Hold the last frame
                self.frame_cursor = spec.frames.len() - 1;
                self.frame_timer = 0.0;
                self.playing = false;
                break;
            }
        }
    }

    /// Key of the current animation, if any was ever played
    pub fn current_animation(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Sprite sheet frame currently shown
    pub fn frame_index(&self, registry: &AnimationRegistry) -> Option<u32> {
        let key = self.current.as_deref()?;
        let spec = registry.lookup(key).ok()?;
        spec.frames.get(self.frame_cursor).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = AnimationRegistry::new();
        registry
            .register("walk", vec![0, 1, 2], 8.0, Repeat::Forever)
            .unwrap();

        let spec = registry.lookup("walk").unwrap();
        assert_eq!(spec.frames, vec![0, 1, 2]);
        assert_relative_eq!(spec.frame_duration(), 0.125);
        assert_eq!(spec.repeat, Repeat::Forever);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut registry = AnimationRegistry::new();
        registry.register("idle", vec![0], 24.0, Repeat::default()).unwrap();

        let err = registry
            .register("idle", vec![1], 24.0, Repeat::default())
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey("idle".to_string()));

        // The first registration is untouched
        assert_eq!(registry.lookup("idle").unwrap().frames, vec![0]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_key() {
        let registry = AnimationRegistry::new();
        let err = registry.lookup("missing").unwrap_err();
        assert_eq!(err, RegistryError::UnknownKey("missing".to_string()));
        assert_eq!(err.to_string(), "Unknown animation: missing");
    }

    #[test]
    fn test_standard_table() {
        let registry = AnimationRegistry::standard().unwrap();
        assert_eq!(registry.len(), 6);

        let walk = registry.lookup(keys::PLAYER_WALK).unwrap();
        assert_eq!(walk.frames, vec![3, 2, 1]);
        assert_relative_eq!(walk.frame_rate, 8.0);
        assert_eq!(walk.repeat, Repeat::Forever);

        let dead = registry.lookup(keys::PLAYER_DEAD).unwrap();
        assert_eq!(dead.frames, vec![4]);
        assert_eq!(dead.repeat, Repeat::Times(0));

        let patrol = registry.lookup(keys::PATROL_WALK).unwrap();
        assert_eq!(patrol.frames, vec![0, 1]);
        assert_eq!(patrol.repeat, Repeat::Times(0));
    }

    #[test]
    fn test_frame_range_direction() {
        assert_eq!(AnimationSpec::frame_range(0, 3), vec![0, 1, 2, 3]);
        assert_eq!(AnimationSpec::frame_range(3, 1), vec![3, 2, 1]);
        assert_eq!(AnimationSpec::frame_range(2, 2), vec![2]);
    }

    #[test]
    fn test_play_unknown_key_fails() {
        let registry = AnimationRegistry::standard().unwrap();
        let mut player = AnimationPlayer::new();
        assert!(player.play(&registry, "stale-key").is_err());
        assert_eq!(player.current_animation(), None);
    }

    #[test]
    fn test_replaying_current_animation_keeps_progress() {
        let registry = AnimationRegistry::standard().unwrap();
        let mut player = AnimationPlayer::new();

        assert!(player.play(&registry, keys::PLAYER_WALK).unwrap());
        player.update(&registry, 0.2); // 1.6 frames at 8 fps
        assert_eq!(player.frame_index(&registry), Some(2));

        for _ in 0..10 {
            assert!(!player.play(&registry, keys::PLAYER_WALK).unwrap());
        }
        assert_eq!(player.frame_index(&registry), Some(2));
    }

    #[test]
    fn test_switching_animation_resets_progress() {
        let registry = AnimationRegistry::standard().unwrap();
        let mut player = AnimationPlayer::new();

        player.play(&registry, keys::PLAYER_WALK).unwrap();
        player.update(&registry, 0.2);
        assert!(player.play(&registry, keys::PLAYER_IDLE).unwrap());
        assert_eq!(player.frame_index(&registry), Some(0));
        assert_eq!(player.current_animation(), Some(keys::PLAYER_IDLE));
    }

    #[test]
    fn test_looping_wraps() {
        let registry = AnimationRegistry::standard().unwrap();
        let mut player = AnimationPlayer::new();
        player.play(&registry, keys::PLAYER_WALK).unwrap();

        player.update(&registry, 0.4); // 3.2 frames
        assert_eq!(player.frame_index(&registry), Some(3));
        // Still running, so asking again is a no-op
        assert!(!player.play(&registry, keys::PLAYER_WALK).unwrap());
    }

    #[test]
    fn test_finite_animation_holds_last_frame() {
        let registry = AnimationRegistry::standard().unwrap();
        let mut player = AnimationPlayer::new();
        player.play(&registry, keys::PATROL_WALK).unwrap();

        player.update(&registry, 1.0); // 4 frames worth, only 2 available
        assert_eq!(player.frame_index(&registry), Some(1));
        player.update(&registry, 1.0);
        assert_eq!(player.frame_index(&registry), Some(1));

        // A finished animation restarts when requested again
        assert!(player.play(&registry, keys::PATROL_WALK).unwrap());
        assert_eq!(player.frame_index(&registry), Some(0));
    }

    #[test]
    fn test_repeat_count_adds_cycles() {
        let mut registry = AnimationRegistry::new();
        registry
            .register("blink", vec![0, 1], 10.0, Repeat::Times(1))
            .unwrap();
        let mut player = AnimationPlayer::new();
        player.play(&registry, "blink").unwrap();

        player.update(&registry, 0.25); // first cycle done, into the second
        assert_eq!(player.frame_index(&registry), Some(0));
        assert!(!player.play(&registry, "blink").unwrap());

        player.update(&registry, 0.2);
        assert_eq!(player.frame_index(&registry), Some(1));
        assert!(player.play(&registry, "blink").unwrap());
    }
}
