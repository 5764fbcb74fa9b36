// Stand-in host for the demo binary
//
// Plays the part of the engine the scene is written against: two kinematic
// bodies on a flat floor and a single pipe. World-edge contacts are reported
// as onset/end events, the pipe and hostile overlap as per-frame state.

use glam::Vec2;
use log::{debug, info};
use std::time::Duration;

use crate::core::Direction;
use crate::engine::body::{Arena, KinematicBody};
use crate::engine::input::InputSnapshot;

use super::actors::{ActorId, Command, ContactSource, HostCommand, PlayerSignals};
use super::scene::{FrameSignals, Scene, SceneConfig};

/// The pipe the patrol turns around at
const PIPE: ContactSource = ContactSource::Obstacle(1);
/// Left face of the pipe
const PIPE_X: f32 = 180.0;

/// Centre distance at which the player and the patrol overlap
const HOSTILE_REACH: f32 = 12.0;

#[derive(Debug)]
pub struct DemoHost {
    arena: Arena,
    player_spawn: Vec2,
    patrol_spawn: Vec2,
    player: KinematicBody,
    patrol: KinematicBody,
    /// World edge the patrol was pressed against after the last step
    patrol_edge: Option<Direction>,
}

impl DemoHost {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            arena: Arena {
                width: config.world.width,
                gravity: config.world.gravity,
            },
            player_spawn: config.player.spawn,
            patrol_spawn: config.patrol.spawn,
            player: KinematicBody::resting_at(config.player.spawn),
            patrol: KinematicBody::resting_at(config.patrol.spawn),
            patrol_edge: None,
        }
    }

    fn reset(&mut self) {
        self.player = KinematicBody::resting_at(self.player_spawn);
        self.patrol = KinematicBody::resting_at(self.patrol_spawn);
        self.patrol_edge = None;
    }

    /// Carry out commands emitted by the scene, in order
    pub fn apply(&mut self, commands: &[HostCommand]) {
        for command in commands {
            let (actor, command) = match command {
                HostCommand::RestartLevel => {
                    self.reset();
                    continue;
                }
                HostCommand::Actor { actor, command } => (*actor, command),
            };

            let body = match actor {
                ActorId::Player => &mut self.player,
                ActorId::Patrol => &mut self.patrol,
            };
            match command {
                Command::SetVelocityX(vx) => body.velocity.x = *vx,
                Command::SetVelocityY(vy) => body.velocity.y = *vy,
                Command::SetCollideWorldBounds(on) => body.collide_world_bounds = *on,
                Command::PlayAnimation(key) => debug!("{:?} animation -> {}", actor, key),
                Command::SetFlipX(flip) => debug!("{:?} flip_x = {}", actor, flip),
                Command::PlaySound { key, volume } => {
                    info!("Playing sound '{}' at volume {:.2}", key, volume)
                }
                Command::Schedule { .. } => debug!("Unexpected {:?} for {:?}", command, actor),
            }
        }
    }

    /// Move both bodies one step, report contact events to `scene` and
    /// sample the signals for the scene's next update
    pub fn step(&mut self, scene: &mut Scene, input: InputSnapshot, dt: Duration) -> FrameSignals {
        let dt = dt.as_secs_f32();
        self.player.step(&self.arena, dt);
        let edge = self.patrol.step(&self.arena, dt);

        if edge != self.patrol_edge {
            if let Some(side) = self.patrol_edge {
                scene.on_contact_ended(ActorId::Patrol, ContactSource::WorldBound(side));
            }
            if let Some(side) = edge {
                scene.on_contact_started(ActorId::Patrol, ContactSource::WorldBound(side));
            }
            self.patrol_edge = edge;
        }

        let mut patrol_contacts = Vec::new();
        if self.patrol.position.x >= PIPE_X {
            patrol_contacts.push(PIPE);
        }

        FrameSignals {
            player: PlayerSignals {
                input,
                grounded: self.player.is_grounded(),
                position: self.player.position,
                hostile_overlap: self.player.position.distance(self.patrol.position)
                    < HOSTILE_REACH,
            },
            patrol_contacts,
        }
    }

    pub fn player_position(&self) -> Vec2 {
        self.player.position
    }

    pub fn patrol_position(&self) -> Vec2 {
        self.patrol.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const STEP: Duration = Duration::from_micros(16_667);

    fn setup() -> (Scene, DemoHost) {
        let mut scene = Scene::create(SceneConfig::default()).unwrap();
        let mut host = DemoHost::new(scene.config());
        host.apply(&scene.drain_commands());
        (scene, host)
    }

    /// Run `steps` fixed steps the way the binary does
    fn run(scene: &mut Scene, host: &mut DemoHost, input: InputSnapshot, steps: usize) {
        for _ in 0..steps {
            if scene.advance_timers(STEP) {
                host.apply(&scene.drain_commands());
                continue;
            }
            let signals = host.step(scene, input, STEP);
            let commands = scene.update(&signals, STEP).unwrap();
            host.apply(&commands);
        }
    }

    #[test]
    fn test_spawn_commands_start_patrol_walking() {
        let (mut scene, mut host) = setup();
        run(&mut scene, &mut host, InputSnapshot::default(), 60);

        // One second at 25 units/s to the left
        assert_relative_eq!(host.patrol_position().x, 75.0, epsilon = 0.5);
        assert_relative_eq!(host.player_position().x, 50.0);
    }

    #[test]
    fn test_walking_input_moves_player() {
        let (mut scene, mut host) = setup();
        let left = InputSnapshot {
            left: true,
            ..InputSnapshot::default()
        };
        run(&mut scene, &mut host, left, 24);

        // The first step moves with the spawn velocity; the walk starts after it
        let expected = 50.0 - 23.0 * 100.0 * STEP.as_secs_f32();
        assert_relative_eq!(host.player_position().x, expected, epsilon = 0.01);
    }

    #[test]
    fn test_patrol_reaching_player_kills_and_restarts() {
        let (mut scene, mut host) = setup();

        // The patrol closes the 50 unit gap in under two seconds
        run(&mut scene, &mut host, InputSnapshot::default(), 120);
        assert!(scene.player().is_dead());
        assert_eq!(scene.restarts(), 0);

        run(&mut scene, &mut host, InputSnapshot::default(), 90);
        assert_eq!(scene.restarts(), 1);
        assert!(!scene.player().is_dead());
        // Back at its spawn point and walking again
        assert!(host.patrol_position().x > 80.0);
        assert!(host.patrol_position().x < 100.0);
    }

    #[test]
    fn test_patrol_turns_at_world_edge_and_pipe() {
        let mut config = SceneConfig::default();
        // Keep the player out of the patrol's path
        config.player.spawn = Vec2::new(1000.0, 210.0);
        let mut scene = Scene::create(config).unwrap();
        let mut host = DemoHost::new(scene.config());
        host.apply(&scene.drain_commands());

        // 100 units to the left edge takes 4s
        run(&mut scene, &mut host, InputSnapshot::default(), 250);
        assert_eq!(scene.patrol().reversals(), 1);
        assert_eq!(scene.patrol().direction(), Direction::Right);

        // Then 180 units across to the pipe
        run(&mut scene, &mut host, InputSnapshot::default(), 450);
        assert_eq!(scene.patrol().reversals(), 2);
        assert_eq!(scene.patrol().direction(), Direction::Left);
        assert!(host.patrol_position().x < PIPE_X + 1.0);
    }
}
