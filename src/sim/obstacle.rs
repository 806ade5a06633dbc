//! Obstacle entities and axis-aligned boxes
//!
//! Every obstacle stands on the floor (y = 0) and is `OBSTACLE_WIDTH` wide
//! along the scroll axis. Depth is shared with the player, so all overlap
//! tests happen in the x/y plane.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// Solid block: lethal from the side, safe to stand on
    Wall,
    /// Thin pad that launches the player upward
    BouncePad,
    /// Lethal on any contact
    Spike,
}

impl ObstacleKind {
    pub const COUNT: usize = 3;
    /// Bucket order used for iteration and snapshots
    pub const ALL: [ObstacleKind; Self::COUNT] =
        [ObstacleKind::Wall, ObstacleKind::BouncePad, ObstacleKind::Spike];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            ObstacleKind::Wall => 0,
            ObstacleKind::BouncePad => 1,
            ObstacleKind::Spike => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Wall => "wall",
            ObstacleKind::BouncePad => "bounce_pad",
            ObstacleKind::Spike => "spike",
        }
    }
}

/// Axis-aligned bounding box (closed on all sides)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Touching edges count as an intersection
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// A live obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Horizontal center in screen space (player at 0)
    pub x: f32,
    pub height: f32,
    pub width: f32,
}

impl Obstacle {
    /// Fails unless `height` and `width` are positive and finite
    pub fn new(
        id: u32,
        kind: ObstacleKind,
        x: f32,
        height: f32,
        width: f32,
    ) -> Result<Self, ConfigError> {
        for (field, value) in [("height", height), ("width", width)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        Ok(Self {
            id,
            kind,
            x,
            height,
            width,
        })
    }

    /// Vertical center of the obstacle
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Top surface (walls are landable here)
    #[inline]
    pub fn top(&self) -> f32 {
        self.center_y() * 2.0
    }

    pub fn aabb(&self) -> Aabb {
        let half_width = self.width / 2.0;
        Aabb::new(
            Vec2::new(self.x - half_width, 0.0),
            Vec2::new(self.x + half_width, self.top()),
        )
    }

    pub fn view(&self) -> ObstacleView {
        ObstacleView {
            id: self.id,
            kind: self.kind,
            x: self.x,
            height: self.height,
        }
    }
}

/// Read-only obstacle data handed to the rendering side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub height: f32,
}
