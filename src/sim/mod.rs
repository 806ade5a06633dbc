//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied, bounded time steps only
//! - Seeded RNG only
//! - Stable iteration order (by kind, then spawn order)
//! - No rendering, audio or storage dependencies

pub mod body;
pub mod collision;
pub mod obstacle;
pub mod pattern;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::PlayerBody;
pub use collision::{Contacts, Outcome, resolve};
pub use obstacle::{Aabb, Obstacle, ObstacleKind, ObstacleView};
pub use pattern::{Pattern, PatternSet, PatternStep};
pub use registry::ObstacleRegistry;
pub use spawner::PatternSpawner;
pub use state::{GameEvent, RunController, RunPhase, RunState, TickReport};
