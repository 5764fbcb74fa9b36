// Patrolling actor controller

use log::debug;
use std::collections::HashSet;

use crate::core::Direction;

use super::animation::{keys, AnimationPlayer, AnimationRegistry, RegistryError};
use super::commands::Command;
use super::stats::PatrolStats;

/// Something a patrolling actor can bump into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSource {
    /// A static obstacle, identified by the host
    Obstacle(u32),
    /// The left or right edge of the world
    WorldBound(Direction),
}

/// Turns contact reports into discrete contact events.
///
/// A source must stop touching before it can produce another event, so a
/// contact that lasts several physics steps counts once.
#[derive(Debug, Default)]
pub struct ContactTracker {
    touching: HashSet<ContactSource>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contact onset. Returns true if it is a new contact.
    pub fn begin(&mut self, source: ContactSource) -> bool {
        self.touching.insert(source)
    }

    /// Record the end of a contact. Returns true if the source was touching.
    pub fn end(&mut self, source: ContactSource) -> bool {
        self.touching.remove(&source)
    }

    /// Replace the touching set with `current` and return the sources whose
    /// contact started this frame, in the order given.
    pub fn sync(&mut self, current: &[ContactSource]) -> Vec<ContactSource> {
        let mut started = Vec::new();
        let mut seen = HashSet::with_capacity(current.len());

        for &source in current {
            if seen.insert(source) && !self.touching.contains(&source) {
                started.push(source);
            }
        }

        self.touching = seen;
        started
    }

    pub fn is_touching(&self, source: ContactSource) -> bool {
        self.touching.contains(&source)
    }
}

/// Keeps an autonomous actor walking at constant speed, turning around on
/// every obstacle or world-edge contact
///
/// Contacts arrive either as onset/end events or as the full set touching
/// each frame. Each feed has its own tracker; a source already touching
/// through one feed never reverses the actor through the other.
#[derive(Debug)]
pub struct PatrolController {
    stats: PatrolStats,
    direction: Direction,
    /// Contacts begun through `on_contact` and not yet ended
    event_contacts: ContactTracker,
    /// Contacts reported through the last `sync_contacts`
    frame_contacts: ContactTracker,
    animation: AnimationPlayer,
    reversals: u32,
}

impl PatrolController {
    pub fn new(stats: PatrolStats) -> Self {
        Self {
            direction: stats.initial_direction,
            stats,
            event_contacts: ContactTracker::new(),
            frame_contacts: ContactTracker::new(),
            animation: AnimationPlayer::new(),
            reversals: 0,
        }
    }

    /// Commands issued when the actor is placed in the level
    pub fn spawn_commands(&self) -> Vec<Command> {
        vec![
            Command::SetCollideWorldBounds(true),
            Command::SetVelocityX(self.velocity_x()),
        ]
    }

    /// Keep the walk cycle going
    pub fn update(
        &mut self,
        registry: &AnimationRegistry,
        dt: f32,
    ) -> Result<Vec<Command>, RegistryError> {
        self.animation.update(registry, dt);

        let mut commands = Vec::new();
        if self.animation.play(registry, keys::PATROL_WALK)? {
            commands.push(Command::PlayAnimation(keys::PATROL_WALK.to_string()));
        }
        Ok(commands)
    }

    /// A contact with an obstacle or world edge started.
    /// Reverses direction unless that source is already touching.
    pub fn on_contact(&mut self, source: ContactSource) -> Option<Command> {
        if !self.event_contacts.begin(source) || self.frame_contacts.is_touching(source) {
            return None;
        }
        Some(self.reverse(source))
    }

    /// A contact ended; the source may trigger a reversal again
    pub fn on_contact_ended(&mut self, source: ContactSource) {
        self.event_contacts.end(source);
    }

    /// Feed the full set of contacts touching this frame, for hosts that
    /// report overlap every step rather than once per onset.
    ///
    /// Only this feed is replaced; contacts begun through `on_contact` stay
    /// until `on_contact_ended`.
    pub fn sync_contacts(&mut self, current: &[ContactSource]) -> Vec<Command> {
        let started: Vec<ContactSource> = self
            .frame_contacts
            .sync(current)
            .into_iter()
            .filter(|source| !self.event_contacts.is_touching(*source))
            .collect();

        started
            .into_iter()
            .map(|source| self.reverse(source))
            .collect()
    }

    fn reverse(&mut self, source: ContactSource) -> Command {
        self.direction = self.direction.reversed();
        self.reversals += 1;
        debug!(
            "Patrol hit {:?}, now heading {:?} ({} reversals)",
            source, self.direction, self.reversals
        );
        Command::SetVelocityX(self.velocity_x())
    }

    pub fn velocity_x(&self) -> f32 {
        self.stats.speed * self.direction.sign()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn reversals(&self) -> u32 {
        self.reversals
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.animation.current_animation()
    }
}
