// Level scene lifecycle
//
// Wires the host's per-frame signals into the actor controllers, owns the
// deferred-action scheduler and rebuilds every actor on restart.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Duration;

use crate::engine::timer::Scheduler;

use super::actors::{
    ActorId, AnimationRegistry, Command, ContactSource, DeferredAction, HostCommand,
    PatrolController, PatrolStats, PlayerController, PlayerSignals, PlayerStats, RegistryError,
    WorldConfig,
};

/// Everything needed to build a scene
#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
    pub world: WorldConfig,
    pub player: PlayerStats,
    pub patrol: PatrolStats,
}

/// Signals sampled by the host for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameSignals {
    pub player: PlayerSignals,
    /// Obstacles and world edges the patrol actor touches this frame
    pub patrol_contacts: Vec<ContactSource>,
}

/// A running level
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    registry: AnimationRegistry,
    player: PlayerController,
    patrol: PatrolController,
    scheduler: Scheduler<ActorId, DeferredAction>,
    /// Commands produced by events between frames
    pending: Vec<HostCommand>,
    restarts: u32,
}

impl Scene {
    /// Build the scene: register animations and spawn both actors.
    ///
    /// Fails if the animation table is inconsistent.
    pub fn create(config: SceneConfig) -> Result<Self> {
        let registry =
            AnimationRegistry::standard().context("Failed to register animations")?;

        let mut scene = Self {
            player: PlayerController::new(config.player.clone(), &config.world),
            patrol: PatrolController::new(config.patrol.clone()),
            config,
            registry,
            scheduler: Scheduler::new(),
            pending: Vec::new(),
            restarts: 0,
        };
        scene.queue_spawn_commands();

        info!(
            "Scene created ({} animations, world {}x{})",
            scene.registry.len(),
            scene.config.world.width,
            scene.config.world.height
        );
        Ok(scene)
    }

    fn queue_spawn_commands(&mut self) {
        let player = self.player.spawn_commands();
        let patrol = self.patrol.spawn_commands();
        self.emit(ActorId::Player, player);
        self.emit(ActorId::Patrol, patrol);
    }

    /// Advance the deferred-action clock by `dt` of real time and run
    /// whatever came due. Returns true if the level restarted.
    ///
    /// Call once per rendered frame with the full frame time, however many
    /// fixed steps that frame runs. Commands produced here are queued for
    /// the next `update` or `drain_commands`.
    pub fn advance_timers(&mut self, dt: Duration) -> bool {
        for fired in self.scheduler.advance(dt) {
            debug!("Timer {} fired: {:?}", fired.id, fired.action);
            match fired.action {
                DeferredAction::DeathImpulse => {
                    if let Some(command) = self.player.apply_death_impulse() {
                        self.emit(fired.owner, vec![command]);
                    }
                }
                DeferredAction::RestartLevel => {
                    self.restart();
                    return true;
                }
            }
        }
        false
    }

    /// Run one controller step.
    ///
    /// `dt` drives animation playback only; deferred actions move with
    /// `advance_timers`.
    pub fn update(
        &mut self,
        signals: &FrameSignals,
        dt: Duration,
    ) -> Result<Vec<HostCommand>, RegistryError> {
        let seconds = dt.as_secs_f32();

        let reversals = self.patrol.sync_contacts(&signals.patrol_contacts);
        self.emit(ActorId::Patrol, reversals);
        let patrol = self.patrol.update(&self.registry, seconds)?;
        self.emit(ActorId::Patrol, patrol);

        let player = self.player.update(&self.registry, &signals.player, seconds)?;
        self.emit(ActorId::Player, player);

        Ok(self.drain_commands())
    }

    /// Event-style report of a contact onset for `actor`
    pub fn on_contact_started(&mut self, actor: ActorId, source: ContactSource) {
        match actor {
            ActorId::Patrol => {
                if let Some(command) = self.patrol.on_contact(source) {
                    self.emit(ActorId::Patrol, vec![command]);
                }
            }
            ActorId::Player => warn!("Ignoring contact {:?} reported for the player", source),
        }
    }

    /// Event-style report of a contact ending for `actor`
    pub fn on_contact_ended(&mut self, actor: ActorId, source: ContactSource) {
        if actor == ActorId::Patrol {
            self.patrol.on_contact_ended(source);
        }
    }

    /// Tear the level down and rebuild every actor.
    ///
    /// Pending deferred actions belong to the old actors and are cancelled.
    pub fn restart(&mut self) {
        let cancelled = self.scheduler.clear();
        self.restarts += 1;
        info!(
            "Restarting level (restart #{}, death cause {:?}, {} pending timers cancelled)",
            self.restarts,
            self.player.death_cause(),
            cancelled
        );

        self.player = PlayerController::new(self.config.player.clone(), &self.config.world);
        self.patrol = PatrolController::new(self.config.patrol.clone());

        self.pending.push(HostCommand::RestartLevel);
        self.queue_spawn_commands();
    }

    /// Route controller output: schedule deferred work, forward the rest
    fn emit(&mut self, actor: ActorId, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Schedule { delay, action } => {
                    let id = self.scheduler.schedule(actor, delay, action);
                    debug!("Scheduled {:?} for {:?} in {:?} (timer {})", action, actor, delay, id);
                }
                command => self.pending.push(HostCommand::actor(actor, command)),
            }
        }
    }

    /// Take every command queued since the last call
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.pending)
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn patrol(&self) -> &PatrolController {
        &self.patrol
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    /// Deferred actions waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// How many times the level has been rebuilt
    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}
