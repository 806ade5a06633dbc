//! Run state and the controller that owns the whole simulation
//!
//! `RunController` is the only owner of the player, the obstacle registry and
//! the spawner. Collaborators read through borrowed views and feed it
//! explicit signals (start, pause, resume, reset, jump).

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::PlayerBody;
use super::collision::{CollisionParams, Outcome};
use super::obstacle::ObstacleView;
use super::registry::ObstacleRegistry;
use super::spawner::PatternSpawner;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the first start signal
    Idle,
    /// Active gameplay
    Running,
    /// Frozen; deltas are rejected
    Paused,
    /// Run ended (only observable when auto-restart is off)
    GameOver,
}

/// Discrete notifications for audio and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    RunStopped,
    Paused,
    Resumed,
    LethalCollision,
    /// Touched down on a wall top (not repeated while resting)
    Landed,
    /// Launched by a pad (once per pad contact)
    Bounced,
    /// First time this run the score passed the previous best
    NewHighScore(f64),
}

/// Per-run counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    /// Scroll velocity (units/s)
    pub velocity: f32,
    pub score: f64,
    pub high_score: f64,
    /// Seconds of running time this run
    pub elapsed: f64,
    /// Track distance scrolled this run
    pub distance: f64,
    /// Runs started this session
    pub runs: u32,
    /// Running ticks this run
    pub ticks: u64,
}

impl RunState {
    pub fn new(initial_velocity: f32) -> Self {
        Self {
            phase: RunPhase::Idle,
            velocity: initial_velocity,
            score: 0.0,
            high_score: 0.0,
            elapsed: 0.0,
            distance: 0.0,
            runs: 0,
            ticks: 0,
        }
    }
}

/// Result of one `tick`
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub phase: RunPhase,
    pub score: f64,
    pub high_score: f64,
    pub velocity: f32,
    /// A lethal collision ended a run during this tick
    pub terminal: bool,
    /// Score of the run that just ended, when `terminal`
    pub final_score: Option<f64>,
    pub outcome: Outcome,
    pub high_score_improved: bool,
    /// Rightmost obstacle x after scrolling
    pub leading_edge: Option<f32>,
    pub spawned: Vec<u32>,
    /// Obstacles removed since the last report; drop their meshes
    pub despawned: Vec<u32>,
    pub events: Vec<GameEvent>,
}

/// Owns and drives a session of runs
#[derive(Debug)]
pub struct RunController<R: Rng = Pcg32> {
    pub(super) tuning: Tuning,
    pub(super) collision: CollisionParams,
    pub(super) player: PlayerBody,
    pub(super) registry: ObstacleRegistry,
    pub(super) spawner: PatternSpawner<R>,
    pub(super) state: RunState,
    pub(super) events: Vec<GameEvent>,
    /// Removed outside a tick (reset/start), reported with the next tick
    pub(super) pending_despawned: Vec<u32>,
    pub(super) on_wall: bool,
    pub(super) on_pad: bool,
    pub(super) high_score_announced: bool,
}

impl RunController<Pcg32> {
    /// Validate tuning and build a controller with a seeded spawner
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        let spawner = PatternSpawner::new(&tuning, seed)?;
        Ok(Self::from_parts(tuning, spawner))
    }
}

impl<R: Rng> RunController<R> {
    /// Build a controller whose spawner draws from `rng`
    pub fn with_rng(tuning: Tuning, rng: R) -> Result<Self, ConfigError> {
        let spawner = PatternSpawner::with_rng(&tuning, rng)?;
        Ok(Self::from_parts(tuning, spawner))
    }

    fn from_parts(tuning: Tuning, spawner: PatternSpawner<R>) -> Self {
        Self {
            collision: CollisionParams::from(&tuning),
            player: PlayerBody::new(
                tuning.player_height,
                tuning.player_width,
                tuning.max_jumps,
                tuning.jump_velocity,
            ),
            registry: ObstacleRegistry::new(),
            spawner,
            state: RunState::new(tuning.initial_velocity),
            events: Vec::new(),
            pending_despawned: Vec::new(),
            on_wall: false,
            on_pad: false,
            high_score_announced: false,
            tuning,
        }
    }

    /// Seed the best score (usually read from storage at startup)
    pub fn with_high_score(mut self, high_score: f64) -> Self {
        self.state.high_score = high_score.max(0.0);
        self
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn registry(&self) -> &ObstacleRegistry {
        &self.registry
    }

    pub fn spawner(&self) -> &PatternSpawner<R> {
        &self.spawner
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Live obstacles for the renderer, ordered by kind then spawn order
    pub fn snapshot(&self) -> Vec<ObstacleView> {
        self.registry.snapshot()
    }

    /// Take queued events without ticking
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a run from Idle or GameOver. Ignored otherwise.
    pub fn start(&mut self) -> bool {
        match self.state.phase {
            RunPhase::Idle | RunPhase::GameOver => {
                self.begin_run();
                true
            }
            RunPhase::Running | RunPhase::Paused => {
                log::debug!("start ignored in {:?}", self.state.phase);
                false
            }
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.state.phase != RunPhase::Running {
            return false;
        }
        self.state.phase = RunPhase::Paused;
        self.events.push(GameEvent::Paused);
        log::info!("Paused at score {:.1}", self.state.score);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.phase != RunPhase::Paused {
            return false;
        }
        self.state.phase = RunPhase::Running;
        self.events.push(GameEvent::Resumed);
        log::info!("Resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            RunPhase::Running => self.pause(),
            RunPhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Throw away the current run and start a fresh one, from any phase
    pub fn reset(&mut self) {
        log::info!("Resetting run (score {:.1})", self.state.score);
        if matches!(self.state.phase, RunPhase::Running | RunPhase::Paused) {
            self.events.push(GameEvent::RunStopped);
        }
        self.begin_run();
    }

    /// Forward a jump to the player. Only honored while running.
    pub fn jump_input(&mut self) -> bool {
        if self.state.phase != RunPhase::Running {
            return false;
        }
        self.player.jump()
    }

    /// Clear everything transient and enter Running
    pub(super) fn begin_run(&mut self) {
        let cleared = self.registry.clear();
        self.pending_despawned.extend(cleared.iter().map(|o| o.id));
        self.player.reset();
        self.spawner.reset();

        self.state.score = 0.0;
        self.state.elapsed = 0.0;
        self.state.distance = 0.0;
        self.state.ticks = 0;
        self.state.velocity = self.tuning.initial_velocity;
        self.state.runs += 1;
        self.state.phase = RunPhase::Running;
        self.on_wall = false;
        self.on_pad = false;
        self.high_score_announced = false;

        self.events.push(GameEvent::RunStarted);
        log::info!("Run {} started", self.state.runs);
    }

    /// Lethal collision: stop, notify, and restart if configured to
    pub(super) fn end_run(&mut self) -> f64 {
        let final_score = self.state.score;
        self.state.phase = RunPhase::GameOver;
        self.events.push(GameEvent::LethalCollision);
        self.events.push(GameEvent::RunStopped);
        log::info!(
            "Run {} over: score {:.1}, best {:.1}",
            self.state.runs,
            final_score,
            self.state.high_score
        );

        if self.tuning.auto_restart {
            self.begin_run();
        }
        final_score
    }
}
