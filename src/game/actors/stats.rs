// Actor tuning and world configuration
//
// The world uses screen coordinates: +x to the right, +y pointing down.
// Negative vertical velocity therefore moves an actor up.

use crate::core::Direction;
use glam::Vec2;
use std::time::Duration;

/// Tuning for the player-controlled actor
#[derive(Debug, Clone)]
pub struct PlayerStats {
    /// Horizontal speed while a direction is held (units/second)
    pub walk_speed: f32,
    /// Vertical velocity applied when a jump starts
    pub jump_impulse: f32,
    /// Vertical velocity applied shortly after death
    pub death_impulse: f32,
    /// Delay between death and the death impulse
    pub death_impulse_delay: Duration,
    /// Delay between death and the level restart
    pub restart_delay: Duration,
    /// Sound played on death
    pub game_over_sound: &'static str,
    pub game_over_volume: f32,
    pub spawn: Vec2,
}

pub const PLAYER_STATS: PlayerStats = PlayerStats {
    walk_speed: 100.0,
    jump_impulse: -300.0,
    death_impulse: -280.0,
    death_impulse_delay: Duration::from_millis(100),
    restart_delay: Duration::from_millis(1400),
    game_over_sound: "gameover",
    game_over_volume: 0.2,
    spawn: Vec2::new(50.0, 210.0),
};

impl Default for PlayerStats {
    fn default() -> Self {
        PLAYER_STATS
    }
}

/// Tuning for an autonomous patrolling actor
#[derive(Debug, Clone)]
pub struct PatrolStats {
    /// Constant horizontal speed (units/second)
    pub speed: f32,
    pub initial_direction: Direction,
    pub spawn: Vec2,
}

pub const PATROL_STATS: PatrolStats = PatrolStats {
    speed: 25.0,
    initial_direction: Direction::Left,
    spawn: Vec2::new(100.0, 210.0),
};

impl Default for PatrolStats {
    fn default() -> Self {
        PATROL_STATS
    }
}

/// Level dimensions shared with the host
#[derive(Debug, Clone)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Downward acceleration the host applies to actors
    pub gravity: f32,
}

pub const WORLD_CONFIG: WorldConfig = WorldConfig {
    width: 2000.0,
    height: 244.0,
    gravity: 300.0,
};

impl WorldConfig {
    /// Vertical position at which an actor has fallen out of the world
    pub fn bottom_threshold(&self) -> f32 {
        self.height
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        WORLD_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_player_stats() {
        let stats = PlayerStats::default();
        assert_eq!(stats.walk_speed, 100.0);
        assert!(stats.jump_impulse < 0.0, "jumping moves up the screen");
        assert!(stats.death_impulse_delay < stats.restart_delay);
    }

    #[test]
    fn test_default_patrol_stats() {
        let stats = PatrolStats::default();
        assert_eq!(stats.speed, 25.0);
        assert_eq!(stats.initial_direction, Direction::Left);
    }

    #[test]
    fn test_bottom_threshold_is_world_height() {
        let world = WorldConfig::default();
        assert_eq!(world.bottom_threshold(), 244.0);
    }

    #[test]
    fn test_spawns_inside_world() {
        let world = WorldConfig::default();
        for spawn in [PlayerStats::default().spawn, PatrolStats::default().spawn] {
            assert!(spawn.x >= 0.0 && spawn.x <= world.width);
            assert!(spawn.y < world.bottom_threshold());
        }
    }
}
