// Actor state machine

use super::animation::keys;

/// Represents the current state of the player actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActorState {
    /// No horizontal intent
    #[default]
    Idle,
    /// Moving horizontally
    Walking,
    /// Jump started this frame
    Jumping,
    /// Terminal. Only a level restart leaves it, by rebuilding the actor.
    Dead,
}

impl ActorState {
    pub fn is_alive(&self) -> bool {
        !matches!(self, Self::Dead)
    }

    /// Whether an edge from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: ActorState) -> bool {
        match self {
            Self::Dead => false,
            _ => *self != next,
        }
    }

    /// Animation played while in this state
    pub fn animation_key(&self) -> &'static str {
        match self {
            Self::Idle => keys::PLAYER_IDLE,
            Self::Walking => keys::PLAYER_WALK,
            Self::Jumping => keys::PLAYER_JUMP,
            Self::Dead => keys::PLAYER_DEAD,
        }
    }
}

/// State machine with guarded edges
#[derive(Debug, Default)]
pub struct ActorStateMachine {
    current_state: ActorState,
    previous_state: ActorState,
}

impl ActorStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ActorState {
        self.current_state
    }

    pub fn previous_state(&self) -> ActorState {
        self.previous_state
    }

    /// Take the edge to `next` if the guard allows it.
    /// Returns true only when the state actually changed.
    pub fn transition(&mut self, next: ActorState) -> bool {
        if !self.current_state.can_transition_to(next) {
            return false;
        }

        self.previous_state = self.current_state;
        self.current_state = next;
        true
    }

    /// Enter Dead. Returns true on the edge, false if already dead.
    pub fn die(&mut self) -> bool {
        self.transition(ActorState::Dead)
    }

    pub fn is_dead(&self) -> bool {
        !self.current_state.is_alive()
    }
}
