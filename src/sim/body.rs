//! Player physics body
//!
//! The player never moves horizontally; the world scrolls past it. Only the
//! vertical axis is integrated here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Aabb;
use crate::consts::*;

/// The player's cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Vertical center of the cube
    pub y: f32,
    pub half_height: f32,
    pub half_width: f32,
    /// Vertical velocity (positive is up)
    pub velocity: f32,
    /// Jumps left before the next landing
    pub jumps: u8,
    pub max_jumps: u8,
    /// Velocity set by `jump`
    pub jump_velocity: f32,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self::new(PLAYER_HEIGHT, PLAYER_WIDTH, MAX_JUMPS, JUMP_VELOCITY)
    }
}

impl PlayerBody {
    /// Dimensions come from validated `Tuning`
    pub(crate) fn new(height: f32, width: f32, max_jumps: u8, jump_velocity: f32) -> Self {
        Self {
            y: height / 2.0,
            half_height: height / 2.0,
            half_width: width / 2.0,
            velocity: 0.0,
            jumps: max_jumps,
            max_jumps,
            jump_velocity,
        }
    }

    /// Apply gravity, move, and clamp to the ground
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.velocity += gravity * dt;
        self.y += self.velocity * dt;

        if self.y <= self.half_height && self.velocity <= 0.0 {
            self.y = self.half_height;
            self.velocity = 0.0;
            self.jumps = self.max_jumps;
        }
    }

    /// Spend one jump charge. Returns false (and changes nothing) when empty.
    pub fn jump(&mut self) -> bool {
        if self.jumps == 0 {
            return false;
        }
        self.velocity = self.jump_velocity;
        self.jumps -= 1;
        true
    }

    /// Rest on a surface whose top puts the cube center at `y`
    pub fn land_at(&mut self, y: f32) {
        self.y = y.max(self.half_height);
        self.velocity = 0.0;
        self.jumps = self.max_jumps;
    }

    /// Launch upward from a bounce pad
    pub fn bounce(&mut self, velocity: f32) {
        self.velocity = velocity;
        self.jumps = self.max_jumps;
    }

    /// Back to the spawn pose
    pub fn reset(&mut self) {
        self.y = self.half_height;
        self.velocity = 0.0;
        self.jumps = self.max_jumps;
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y - self.half_height
    }

    pub fn is_grounded(&self) -> bool {
        self.y <= self.half_height && self.velocity == 0.0
    }

    /// Bounding box in the scroll plane (player sits at x = 0)
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            Vec2::new(-self.half_width, self.y - self.half_height),
            Vec2::new(self.half_width, self.y + self.half_height),
        )
    }
}
