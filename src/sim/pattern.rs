//! Obstacle patterns
//!
//! A pattern is a fixed run of obstacles spawned together. The spawner picks
//! one per cadence using weighted selection over the whole set.

use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleKind;
use crate::error::ConfigError;

/// One obstacle in a pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStep {
    pub kind: ObstacleKind,
    /// Explicit height; walls without one get a random height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl PatternStep {
    pub fn new(kind: ObstacleKind) -> Self {
        Self { kind, height: None }
    }

    pub fn with_height(kind: ObstacleKind, height: f32) -> Self {
        Self {
            kind,
            height: Some(height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    pub steps: Vec<PatternStep>,
}

fn default_weight() -> f32 {
    1.0
}

impl Pattern {
    pub fn new(name: impl Into<String>, steps: Vec<PatternStep>) -> Self {
        Self {
            name: name.into(),
            weight: default_weight(),
            steps,
        }
    }

    /// Reject patterns that would stall spawning or build bad geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::EmptyPattern {
                name: self.name.clone(),
            });
        }
        if !(self.weight > 0.0 && self.weight.is_finite()) {
            return Err(ConfigError::InvalidWeight {
                name: self.name.clone(),
                weight: self.weight,
            });
        }
        for (index, step) in self.steps.iter().enumerate() {
            if let Some(height) = step.height {
                if !(height > 0.0 && height.is_finite()) {
                    return Err(ConfigError::InvalidStepHeight {
                        name: self.name.clone(),
                        index,
                        height,
                    });
                }
            }
        }
        Ok(())
    }
}

/// The built-in rotation
pub fn default_patterns() -> Vec<Pattern> {
    use ObstacleKind::*;
    vec![
        Pattern::new(
            "staircase",
            vec![
                PatternStep::with_height(Wall, 2.1),
                PatternStep::new(Spike),
                PatternStep::new(BouncePad),
                PatternStep::with_height(Wall, 5.4),
                PatternStep::new(Spike),
            ],
        ),
        Pattern::new(
            "launch",
            vec![
                PatternStep::new(Spike),
                PatternStep::new(BouncePad),
                PatternStep::with_height(Wall, 5.4),
                PatternStep::with_height(Wall, 2.0),
                PatternStep::new(Spike),
            ],
        ),
        Pattern::new(
            "spike_field",
            vec![
                PatternStep::new(Spike),
                PatternStep::new(Spike),
                PatternStep::with_height(Wall, 1.8),
                PatternStep::new(Spike),
                PatternStep::new(Spike),
            ],
        ),
    ]
}

/// Validated patterns with precomputed selection thresholds
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    /// Cumulative upper bounds partitioning [0, 1)
    thresholds: Vec<f32>,
}

impl PatternSet {
    pub fn new(patterns: Vec<Pattern>) -> Result<Self, ConfigError> {
        if patterns.is_empty() {
            return Err(ConfigError::NoPatterns);
        }
        for pattern in &patterns {
            pattern.validate()?;
        }

        let total: f32 = patterns.iter().map(|p| p.weight).sum();
        let mut acc = 0.0;
        let mut thresholds: Vec<f32> = patterns
            .iter()
            .map(|p| {
                acc += p.weight / total;
                acc
            })
            .collect();
        // Float drift must not leave a gap below 1.0
        if let Some(last) = thresholds.last_mut() {
            *last = 1.0;
        }

        Ok(Self {
            patterns,
            thresholds,
        })
    }

    /// Pick the pattern whose threshold band contains `roll` (in [0, 1))
    pub fn select(&self, roll: f32) -> &Pattern {
        let index = self
            .thresholds
            .iter()
            .position(|&t| roll < t)
            .unwrap_or(self.patterns.len() - 1);
        &self.patterns[index]
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_are_valid() {
        let set = PatternSet::new(default_patterns()).unwrap();
        assert_eq!(set.patterns().len(), 3);
        assert!(set.patterns().iter().all(|p| p.steps.len() == 5));
    }

    #[test]
    fn test_uniform_thresholds() {
        let set = PatternSet::new(default_patterns()).unwrap();
        let t = set.thresholds();
        assert!((t[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((t[1] - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(t[2], 1.0);
    }

    #[test]
    fn test_weighted_selection() {
        let mut patterns = default_patterns();
        patterns[0].weight = 3.0;
        let set = PatternSet::new(patterns).unwrap();
        // 3 / 5 of the range goes to the first pattern
        assert_eq!(set.select(0.0).name, "staircase");
        assert_eq!(set.select(0.59).name, "staircase");
        assert_eq!(set.select(0.61).name, "launch");
        assert_eq!(set.select(0.81).name, "spike_field");
        assert_eq!(set.select(0.9999).name, "spike_field");
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(PatternSet::new(vec![]), Err(ConfigError::NoPatterns)));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = PatternSet::new(vec![Pattern::new("nothing", vec![])]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPattern { ref name } if name == "nothing"));
    }

    #[test]
    fn test_bad_weight_and_height_rejected() {
        let mut pattern = Pattern::new("w", vec![PatternStep::new(ObstacleKind::Spike)]);
        pattern.weight = 0.0;
        assert!(matches!(
            pattern.validate(),
            Err(ConfigError::InvalidWeight { .. })
        ));

        let pattern = Pattern::new(
            "h",
            vec![
                PatternStep::new(ObstacleKind::Spike),
                PatternStep::with_height(ObstacleKind::Wall, -1.0),
            ],
        );
        assert!(matches!(
            pattern.validate(),
            Err(ConfigError::InvalidStepHeight { index: 1, .. })
        ));
    }

    #[test]
    fn test_pattern_json() {
        let json = r#"{"name":"pair","steps":[{"kind":"wall","height":3.0},{"kind":"bounce_pad"}]}"#;
        let pattern: Pattern = serde_json::from_str(json).unwrap();
        assert_eq!(pattern.weight, 1.0);
        assert_eq!(pattern.steps[0], PatternStep::with_height(ObstacleKind::Wall, 3.0));
        assert_eq!(pattern.steps[1], PatternStep::new(ObstacleKind::BouncePad));

        let bad = r#"{"name":"x","steps":[{"kind":"saw"}]}"#;
        assert!(serde_json::from_str::<Pattern>(bad).is_err());
    }
}
