//! Collision classification between the player and live obstacles
//!
//! Every overlap is sorted into lethal, landing or bounce. A single lethal
//! contact decides the whole tick; otherwise landings and bounces are applied
//! to the player body.

use super::body::PlayerBody;
use super::obstacle::{Obstacle, ObstacleKind};
use super::registry::ObstacleRegistry;
use crate::tuning::Tuning;

/// What a tick's collisions did to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    None,
    /// Resting on a wall top with the center at this height
    Landed(f32),
    Bounced,
    Lethal,
}

impl Outcome {
    pub fn is_lethal(&self) -> bool {
        matches!(self, Outcome::Lethal)
    }
}

/// Collision tolerances taken from tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    pub landing_tolerance: f32,
    pub bounce_margin: f32,
    pub bounce_velocity: f32,
}

impl From<&Tuning> for CollisionParams {
    fn from(tuning: &Tuning) -> Self {
        Self {
            landing_tolerance: tuning.landing_tolerance(),
            bounce_margin: tuning.bounce_margin,
            bounce_velocity: tuning.bounce_velocity,
        }
    }
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self::from(&Tuning::default())
    }
}

/// Classify one obstacle against the player
pub fn classify(player: &PlayerBody, obstacle: &Obstacle, params: &CollisionParams) -> Outcome {
    if !player.aabb().intersects(&obstacle.aabb()) {
        return Outcome::None;
    }

    match obstacle.kind {
        ObstacleKind::Spike => Outcome::Lethal,
        ObstacleKind::Wall => {
            let top = obstacle.top();
            if player.bottom() >= top - params.landing_tolerance {
                Outcome::Landed(top + player.half_height)
            } else {
                Outcome::Lethal
            }
        }
        ObstacleKind::BouncePad => {
            if player.y <= obstacle.top() + params.bounce_margin {
                Outcome::Bounced
            } else {
                Outcome::None
            }
        }
    }
}

/// Everything the player touched this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contacts {
    pub lethal: bool,
    /// Highest landing height among all qualifying walls
    pub landing: Option<f32>,
    pub bounce: bool,
}

impl Contacts {
    /// Collapse to a single outcome: lethal beats bounce beats landing
    pub fn outcome(&self) -> Outcome {
        if self.lethal {
            Outcome::Lethal
        } else if self.bounce {
            Outcome::Bounced
        } else if let Some(y) = self.landing {
            Outcome::Landed(y)
        } else {
            Outcome::None
        }
    }
}

/// Scan every live obstacle. Stops at the first lethal contact.
pub fn contacts(
    player: &PlayerBody,
    registry: &ObstacleRegistry,
    params: &CollisionParams,
) -> Contacts {
    let mut found = Contacts::default();
    for obstacle in registry.iter() {
        match classify(player, obstacle, params) {
            Outcome::Lethal => {
                return Contacts {
                    lethal: true,
                    ..Contacts::default()
                };
            }
            Outcome::Landed(y) => {
                found.landing = Some(found.landing.map_or(y, |best| best.max(y)));
            }
            Outcome::Bounced => found.bounce = true,
            Outcome::None => {}
        }
    }
    found
}

/// Classify and apply. A lethal result leaves the player untouched; the
/// caller ends the run.
pub fn resolve(
    player: &mut PlayerBody,
    registry: &ObstacleRegistry,
    params: &CollisionParams,
) -> Outcome {
    let found = contacts(player, registry, params);
    if found.lethal {
        return Outcome::Lethal;
    }
    if let Some(y) = found.landing {
        player.land_at(y);
    }
    if found.bounce {
        player.bounce(params.bounce_velocity);
    }
    found.outcome()
}
