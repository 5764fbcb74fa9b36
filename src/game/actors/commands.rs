// Commands emitted by actor controllers for the host engine

use std::time::Duration;

/// Actors the scene knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorId {
    Player,
    Patrol,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Overlapped a hostile actor
    HostileContact,
    /// Fell past the bottom of the world
    FellOutOfWorld,
}

/// Work deferred by a death sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Small upward kick once the death animation is showing
    DeathImpulse,
    /// Tear the level down and build it again
    RestartLevel,
}

/// Instruction for the host engine
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetVelocityX(f32),
    SetVelocityY(f32),
    PlayAnimation(String),
    SetFlipX(bool),
    SetCollideWorldBounds(bool),
    PlaySound { key: String, volume: f32 },
    /// Handled by the scene's scheduler, never forwarded
    Schedule { delay: Duration, action: DeferredAction },
}

/// Output of a scene frame
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Actor { actor: ActorId, command: Command },
    /// Rebuild every actor and static body from scratch
    RestartLevel,
}

impl HostCommand {
    pub fn actor(actor: ActorId, command: Command) -> Self {
        Self::Actor { actor, command }
    }
}
