// Kinematic stand-in for a physics body
//
// Integrates velocity under constant gravity, rests on a flat floor and
// stays between the world's side edges while world-bound collision is on.
// There is no body-to-body collision resolution.

use glam::Vec2;

use crate::core::Direction;

/// Horizontal extent and gravity shared by every body in a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    /// Downward acceleration (+y is down)
    pub gravity: f32,
}

#[derive(Debug, Clone)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Whether the floor and side edges hold the body
    pub collide_world_bounds: bool,
    floor_y: f32,
    grounded: bool,
}

impl KinematicBody {
    /// A body standing on a floor at its spawn height
    pub fn resting_at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            collide_world_bounds: true,
            floor_y: position.y,
            grounded: true,
        }
    }

    /// Integrate one step.
    ///
    /// Returns the side edge the body is pressed against after the step.
    pub fn step(&mut self, arena: &Arena, dt: f32) -> Option<Direction> {
        self.velocity.y += arena.gravity * dt;
        self.position += self.velocity * dt;
        self.grounded = false;

        if !self.collide_world_bounds {
            return None;
        }

        if self.position.y >= self.floor_y && self.velocity.y >= 0.0 {
            self.position.y = self.floor_y;
            self.velocity.y = 0.0;
            self.grounded = true;
        }

        if self.position.x <= 0.0 {
            self.position.x = 0.0;
            Some(Direction::Left)
        } else if self.position.x >= arena.width {
            self.position.x = arena.width;
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }
}
