//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a run can be retuned from a
//! JSON file without recompiling. Missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::pattern::{Pattern, default_patterns};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration (negative)
    pub gravity: f32,
    pub jump_velocity: f32,
    pub bounce_velocity: f32,
    pub max_jumps: u8,
    pub player_height: f32,
    pub player_width: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub bounce_pad_height: f32,
    pub spike_height: f32,
    /// Inclusive integer range for walls without an explicit height
    pub wall_height_min: u32,
    pub wall_height_max: u32,
    /// How far below a wall top the player's bottom may sink and still land.
    /// Defaults to half the player height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_tolerance: Option<f32>,
    /// Bounce triggers while the player center is within this of the pad top
    pub bounce_margin: f32,
    /// Obstacles left of this x are removed (behind the camera)
    pub removal_threshold: f32,

    // === Difficulty ===
    pub initial_velocity: f32,
    /// Scroll speed gained per second of run time
    pub acceleration: f32,
    /// Ceiling for the ramp. Keeps one tick's scroll well under an obstacle
    /// width so fast runs cannot step through a wall.
    pub max_velocity: f32,
    pub score_rate: f64,

    // === Spawning ===
    /// Seconds between patterns
    pub spawn_interval: f32,
    pub base_spacing: f32,
    /// Track position of the first pattern in a run
    pub initial_spawn_position: f32,
    /// Patterns never start closer than this to the player
    pub min_spawn_lead: f32,
    /// Spawning waits while the spawn point is further ahead than this
    pub max_lookahead: f32,
    pub patterns: Vec<Pattern>,

    // === Run flow ===
    /// Restart immediately after a lethal collision
    pub auto_restart: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            bounce_velocity: BOUNCE_VELOCITY,
            max_jumps: MAX_JUMPS,
            player_height: PLAYER_HEIGHT,
            player_width: PLAYER_WIDTH,

            obstacle_width: OBSTACLE_WIDTH,
            bounce_pad_height: BOUNCE_PAD_HEIGHT,
            spike_height: SPIKE_HEIGHT,
            wall_height_min: 1,
            wall_height_max: 3,
            landing_tolerance: None,
            bounce_margin: 0.3,
            removal_threshold: -20.0,

            initial_velocity: INITIAL_VELOCITY,
            acceleration: 0.2,
            max_velocity: 30.0,
            score_rate: SCORE_RATE,

            spawn_interval: SPAWN_INTERVAL,
            base_spacing: OBJECT_SPACING,
            initial_spawn_position: 30.0,
            min_spawn_lead: 25.0,
            max_lookahead: 150.0,
            patterns: default_patterns(),

            auto_restart: true,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl Tuning {
    /// Parse and validate tuning JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded tuning from {} ({} patterns)",
            path.display(),
            tuning.patterns.len()
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Effective landing tolerance
    pub fn landing_tolerance(&self) -> f32 {
        self.landing_tolerance.unwrap_or(self.player_height / 2.0)
    }

    /// Closest a pattern may start without overlapping the player
    pub fn spawn_clearance(&self) -> f32 {
        (self.player_width + self.obstacle_width) / 2.0
    }

    /// Check every geometry and timing parameter. Patterns are checked by
    /// `PatternSet::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravity < 0.0 && self.gravity.is_finite()) {
            return Err(ConfigError::NotNegative {
                field: "gravity",
                value: self.gravity as f64,
            });
        }
        if !(self.removal_threshold < 0.0) {
            return Err(ConfigError::NotNegative {
                field: "removal_threshold",
                value: self.removal_threshold as f64,
            });
        }

        positive("jump_velocity", self.jump_velocity as f64)?;
        positive("bounce_velocity", self.bounce_velocity as f64)?;
        positive("max_jumps", self.max_jumps as f64)?;
        positive("player_height", self.player_height as f64)?;
        positive("player_width", self.player_width as f64)?;
        positive("obstacle_width", self.obstacle_width as f64)?;
        positive("bounce_pad_height", self.bounce_pad_height as f64)?;
        positive("spike_height", self.spike_height as f64)?;
        positive("bounce_margin", self.bounce_margin as f64)?;
        positive("initial_velocity", self.initial_velocity as f64)?;
        positive("max_velocity", self.max_velocity as f64)?;
        positive("score_rate", self.score_rate)?;
        positive("spawn_interval", self.spawn_interval as f64)?;
        positive("base_spacing", self.base_spacing as f64)?;
        positive("max_lookahead", self.max_lookahead as f64)?;

        if self.acceleration < 0.0 || !self.acceleration.is_finite() {
            return Err(ConfigError::NonPositive {
                field: "acceleration",
                value: self.acceleration as f64,
            });
        }
        if let Some(tolerance) = self.landing_tolerance {
            if tolerance < 0.0 || !tolerance.is_finite() {
                return Err(ConfigError::NonPositive {
                    field: "landing_tolerance",
                    value: tolerance as f64,
                });
            }
        }
        if !(self.max_velocity >= self.initial_velocity) {
            return Err(ConfigError::VelocityCapTooLow {
                initial: self.initial_velocity,
                max: self.max_velocity,
            });
        }
        let clearance = self.spawn_clearance();
        for (field, value) in [
            ("initial_spawn_position", self.initial_spawn_position),
            ("min_spawn_lead", self.min_spawn_lead),
        ] {
            if !(value > clearance && value.is_finite()) {
                return Err(ConfigError::SpawnTooClose {
                    field,
                    value,
                    clearance,
                });
            }
        }
        if self.wall_height_min == 0 || self.wall_height_min > self.wall_height_max {
            return Err(ConfigError::InvalidHeightRange {
                min: self.wall_height_min,
                max: self.wall_height_max,
            });
        }
        if self.patterns.is_empty() {
            return Err(ConfigError::NoPatterns);
        }
        for pattern in &self.patterns {
            pattern.validate()?;
        }
        Ok(())
    }

    /// Scroll velocity after `elapsed` seconds of running, capped at
    /// `max_velocity`
    pub fn velocity_at(&self, elapsed: f64) -> f32 {
        let ramped = self.initial_velocity as f64 + self.acceleration as f64 * elapsed;
        ramped.min(self.max_velocity as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{"initial_velocity": 12.0, "auto_restart": false}"#).unwrap();
        assert_eq!(tuning.initial_velocity, 12.0);
        assert!(!tuning.auto_restart);
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.patterns.len(), 3);
    }

    #[test]
    fn test_json_roundtrip_keeps_patterns() {
        let json = Tuning::default().to_json().unwrap();
        let tuning = Tuning::from_json(&json).unwrap();
        assert_eq!(tuning.patterns, default_patterns());
    }

    #[test]
    fn test_non_positive_geometry_rejected() {
        let tuning = Tuning {
            player_height: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NonPositive {
                field: "player_height",
                ..
            })
        ));

        let tuning = Tuning {
            gravity: 9.8,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotNegative { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_bad_height_range_rejected() {
        let tuning = Tuning {
            wall_height_min: 4,
            wall_height_max: 2,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidHeightRange { min: 4, max: 2 })
        ));
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let json = r#"{"patterns":[{"name":"x","steps":[{"kind":"laser"}]}]}"#;
        assert!(matches!(Tuning::from_json(json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let json = r#"{"patterns":[{"name":"blank","steps":[]}]}"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(ConfigError::EmptyPattern { .. })
        ));
    }

    #[test]
    fn test_velocity_ramp_is_capped() {
        let tuning = Tuning::default();
        assert_eq!(tuning.velocity_at(0.0), INITIAL_VELOCITY);
        assert!(tuning.velocity_at(10.0) > tuning.velocity_at(5.0));
        assert_eq!(tuning.velocity_at(10_000.0), tuning.max_velocity);
    }

    #[test]
    fn test_landing_tolerance_follows_player_height() {
        assert_eq!(Tuning::default().landing_tolerance(), PLAYER_HEIGHT / 2.0);
        let tall = Tuning {
            player_height: 2.0,
            ..Default::default()
        };
        assert_eq!(tall.landing_tolerance(), 1.0);
        let tuning = Tuning::from_json(r#"{"landing_tolerance": 0.1}"#).unwrap();
        assert_eq!(tuning.landing_tolerance(), 0.1);
        assert!(!Tuning::default().to_json().unwrap().contains("landing_tolerance"));
    }

    #[test]
    fn test_velocity_cap_below_initial_rejected() {
        let tuning = Tuning {
            max_velocity: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::VelocityCapTooLow { .. })
        ));

        let flat = Tuning {
            max_velocity: INITIAL_VELOCITY,
            ..Default::default()
        };
        flat.validate().unwrap();
        assert_eq!(flat.velocity_at(100.0), INITIAL_VELOCITY);
    }

    #[test]
    fn test_spawn_inside_player_rejected() {
        let tuning = Tuning {
            initial_spawn_position: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::SpawnTooClose {
                field: "initial_spawn_position",
                ..
            })
        ));

        // Exactly touching the player is still too close
        let tuning = Tuning {
            min_spawn_lead: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::SpawnTooClose {
                field: "min_spawn_lead",
                ..
            })
        ));

        let json = r#"{"initial_spawn_position": -5.0, "min_spawn_lead": 0.0}"#;
        assert!(Tuning::from_json(json).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Tuning::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
