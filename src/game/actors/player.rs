// Player actor controller

use glam::Vec2;
use log::{debug, info};

use crate::core::Direction;
use crate::engine::input::InputSnapshot;

use super::animation::{AnimationPlayer, AnimationRegistry, RegistryError};
use super::commands::{Command, DeathCause, DeferredAction};
use super::state::{ActorState, ActorStateMachine};
use super::stats::{PlayerStats, WorldConfig};

/// Everything the host samples for the player in one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerSignals {
    pub input: InputSnapshot,
    /// Whether the player's body is resting on something
    pub grounded: bool,
    pub position: Vec2,
    /// Whether the player overlaps a hostile actor this frame
    pub hostile_overlap: bool,
}

/// Owns the player's per-actor state and turns frame signals into commands
#[derive(Debug)]
pub struct PlayerController {
    stats: PlayerStats,
    bottom_threshold: f32,
    state_machine: ActorStateMachine,
    animation: AnimationPlayer,
    facing: Direction,
    velocity_x: f32,
    death_cause: Option<DeathCause>,
    death_impulse_applied: bool,
}

impl PlayerController {
    pub fn new(stats: PlayerStats, world: &WorldConfig) -> Self {
        Self {
            stats,
            bottom_threshold: world.bottom_threshold(),
            state_machine: ActorStateMachine::new(),
            animation: AnimationPlayer::new(),
            facing: Direction::Right,
            velocity_x: 0.0,
            death_cause: None,
            death_impulse_applied: false,
        }
    }

    /// Commands issued when the actor is placed in the level
    pub fn spawn_commands(&self) -> Vec<Command> {
        vec![Command::SetCollideWorldBounds(true)]
    }

    /// Resolve one frame of movement intent.
    ///
    /// Once dead, this returns no commands at all.
    pub fn update(
        &mut self,
        registry: &AnimationRegistry,
        signals: &PlayerSignals,
        dt: f32,
    ) -> Result<Vec<Command>, RegistryError> {
        self.animation.update(registry, dt);

        if self.is_dead() {
            return Ok(Vec::new());
        }

        if signals.hostile_overlap {
            return self.kill(registry, DeathCause::HostileContact);
        }
        if signals.position.y >= self.bottom_threshold {
            return self.kill(registry, DeathCause::FellOutOfWorld);
        }

        let mut commands = Vec::new();
        let input = signals.input;

        // Left wins when both directions are held
        let mut next = if input.left {
            self.walk(Direction::Left, &mut commands);
            ActorState::Walking
        } else if input.right {
            self.walk(Direction::Right, &mut commands);
            ActorState::Walking
        } else {
            self.velocity_x = 0.0;
            ActorState::Idle
        };
        commands.push(Command::SetVelocityX(self.velocity_x));

        if input.up && signals.grounded {
            commands.push(Command::SetVelocityY(self.stats.jump_impulse));
            next = ActorState::Jumping;
        }

        if self.state_machine.transition(next) {
            debug!("Player {:?} -> {:?}", self.state_machine.previous_state(), next);
        }
        self.play(registry, next.animation_key(), &mut commands)?;

        Ok(commands)
    }

    fn walk(&mut self, direction: Direction, commands: &mut Vec<Command>) {
        self.velocity_x = direction.sign() * self.stats.walk_speed;

        if self.facing != direction {
            self.facing = direction;
            commands.push(Command::SetFlipX(direction.flip_x()));
        }
    }

    fn play(
        &mut self,
        registry: &AnimationRegistry,
        key: &str,
        commands: &mut Vec<Command>,
    ) -> Result<(), RegistryError> {
        if self.animation.play(registry, key)? {
            commands.push(Command::PlayAnimation(key.to_string()));
        }
        Ok(())
    }

    /// Run the death sequence.
    ///
    /// The side effects are emitted only on the edge into Dead; any later
    /// call returns no commands.
    pub fn kill(
        &mut self,
        registry: &AnimationRegistry,
        cause: DeathCause,
    ) -> Result<Vec<Command>, RegistryError> {
        // Validate before committing so a stale key leaves the actor alive
        registry.lookup(ActorState::Dead.animation_key())?;

        if !self.state_machine.die() {
            debug!("Ignoring {:?}: player already dead", cause);
            return Ok(Vec::new());
        }

        info!("Player died ({:?})", cause);
        self.death_cause = Some(cause);

        let mut commands = vec![Command::SetCollideWorldBounds(false)];
        self.play(registry, ActorState::Dead.animation_key(), &mut commands)?;
        commands.push(Command::PlaySound {
            key: self.stats.game_over_sound.to_string(),
            volume: self.stats.game_over_volume,
        });
        commands.push(Command::Schedule {
            delay: self.stats.death_impulse_delay,
            action: DeferredAction::DeathImpulse,
        });
        commands.push(Command::Schedule {
            delay: self.stats.restart_delay,
            action: DeferredAction::RestartLevel,
        });

        Ok(commands)
    }

    /// The delayed upward kick of the death sequence. Fires at most once.
    pub fn apply_death_impulse(&mut self) -> Option<Command> {
        if !self.is_dead() || self.death_impulse_applied {
            return None;
        }

        self.death_impulse_applied = true;
        Some(Command::SetVelocityY(self.stats.death_impulse))
    }

    pub fn is_dead(&self) -> bool {
        self.state_machine.is_dead()
    }

    pub fn state(&self) -> ActorState {
        self.state_machine.state()
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death_cause
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.animation.current_animation()
    }

    /// Sprite sheet frame the host should show
    pub fn sprite_frame(&self, registry: &AnimationRegistry) -> Option<u32> {
        self.animation.frame_index(registry)
    }
}
