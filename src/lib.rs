//! Cube Dash - an endless side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, spawning, collisions)
//! - `tuning`: Data-driven game balance
//! - `persistence`: Key-value storage for values that outlive a run
//! - `highscores`: Best score tracking on top of `persistence`
//! - `audio`: Sound cues derived from simulation events

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use highscores::HighScore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Upper bound on a frame delta before it reaches the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = -9.8;
    /// Vertical velocity set by a jump (overwrites, never adds)
    pub const JUMP_VELOCITY: f32 = 5.0;
    /// Vertical velocity imparted by a bounce pad
    pub const BOUNCE_VELOCITY: f32 = 10.0;
    /// Jumps available before touching a surface again
    pub const MAX_JUMPS: u8 = 2;

    /// Player cube dimensions
    pub const PLAYER_HEIGHT: f32 = 1.0;
    pub const PLAYER_WIDTH: f32 = 1.0;

    /// Obstacle footprint along the scroll axis
    pub const OBSTACLE_WIDTH: f32 = 1.0;
    pub const BOUNCE_PAD_HEIGHT: f32 = 0.4;
    pub const SPIKE_HEIGHT: f32 = 0.75;

    /// Starting scroll velocity (units/s)
    pub const INITIAL_VELOCITY: f32 = 10.0;
    /// Score gained per second of survival
    pub const SCORE_RATE: f64 = 10.0;

    /// Seconds between pattern spawns
    pub const SPAWN_INTERVAL: f32 = 1.3;
    /// Distance between consecutive obstacles before speed scaling
    pub const OBJECT_SPACING: f32 = 6.0;
}
