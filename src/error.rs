//! Error types
//!
//! The simulation itself never fails mid-tick; everything that can go wrong is
//! caught while loading and validating configuration.

use thiserror::Error;

/// Invalid or unreadable tuning data. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pattern set must contain at least one pattern")]
    NoPatterns,
    #[error("pattern `{name}` has no steps")]
    EmptyPattern { name: String },
    #[error("pattern `{name}` has non-positive weight {weight}")]
    InvalidWeight { name: String, weight: f32 },
    #[error("pattern `{name}` step {index} has non-positive height {height}")]
    InvalidStepHeight {
        name: String,
        index: usize,
        height: f32,
    },
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be negative, got {value}")]
    NotNegative { field: &'static str, value: f64 },
    #[error("wall height range {min}..={max} is empty or non-positive")]
    InvalidHeightRange { min: u32, max: u32 },
    #[error("max_velocity {max} is below initial_velocity {initial}")]
    VelocityCapTooLow { initial: f32, max: f32 },
    #[error("`{field}` is {value}, patterns would spawn inside the player (need more than {clearance})")]
    SpawnTooClose {
        field: &'static str,
        value: f32,
        clearance: f32,
    },
}
