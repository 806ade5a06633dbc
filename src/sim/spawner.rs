//! Procedural obstacle generation
//!
//! Patterns are laid out along the track, not the screen: the spawn cursor
//! (`furthest_spawn_position`) is a distance along the course and only ever
//! moves forward. An obstacle's screen x is its track position minus the
//! distance already scrolled.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::obstacle::ObstacleKind;
use super::pattern::PatternSet;
use super::registry::ObstacleRegistry;
use crate::error::ConfigError;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct PatternSpawner<R: Rng = Pcg32> {
    patterns: PatternSet,
    rng: R,
    /// Track position where the next pattern starts
    furthest_spawn_position: f64,
    time_since_last_spawn: f32,

    interval: f32,
    base_spacing: f32,
    initial_position: f64,
    min_lead: f64,
    max_lookahead: f64,
    wall_height_min: u32,
    wall_height_max: u32,
    obstacle_width: f32,
    bounce_pad_height: f32,
    spike_height: f32,
}

impl PatternSpawner<Pcg32> {
    /// Spawner with a seeded PCG stream
    pub fn new(tuning: &Tuning, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> PatternSpawner<R> {
    /// Spawner drawing from a caller-supplied RNG
    pub fn with_rng(tuning: &Tuning, rng: R) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let patterns = PatternSet::new(tuning.patterns.clone())?;
        Ok(Self {
            patterns,
            rng,
            furthest_spawn_position: tuning.initial_spawn_position as f64,
            // Primed so the first running tick lays down a pattern
            time_since_last_spawn: tuning.spawn_interval,
            interval: tuning.spawn_interval,
            base_spacing: tuning.base_spacing,
            initial_position: tuning.initial_spawn_position as f64,
            min_lead: tuning.min_spawn_lead as f64,
            max_lookahead: tuning.max_lookahead as f64,
            wall_height_min: tuning.wall_height_min,
            wall_height_max: tuning.wall_height_max,
            obstacle_width: tuning.obstacle_width,
            bounce_pad_height: tuning.bounce_pad_height,
            spike_height: tuning.spike_height,
        })
    }

    pub fn furthest_spawn_position(&self) -> f64 {
        self.furthest_spawn_position
    }

    pub fn time_since_last_spawn(&self) -> f32 {
        self.time_since_last_spawn
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Advance the cadence clock and spawn at most one pattern.
    ///
    /// `distance` is how far the world has scrolled so far this run. Returns
    /// the ids of any obstacles created.
    pub fn update(
        &mut self,
        dt: f32,
        velocity: f32,
        distance: f64,
        registry: &mut ObstacleRegistry,
    ) -> Vec<u32> {
        self.time_since_last_spawn += dt;
        if self.time_since_last_spawn <= self.interval {
            return Vec::new();
        }
        if self.furthest_spawn_position - distance > self.max_lookahead {
            // Far enough ahead already; try again next tick
            return Vec::new();
        }
        self.time_since_last_spawn = 0.0;
        self.spawn(velocity, distance, registry)
    }

    /// Pick a pattern and lay it out from the spawn cursor
    pub fn spawn(
        &mut self,
        velocity: f32,
        distance: f64,
        registry: &mut ObstacleRegistry,
    ) -> Vec<u32> {
        let roll: f32 = self.rng.random();
        let pattern = self.patterns.select(roll).clone();

        self.furthest_spawn_position = self.furthest_spawn_position.max(distance + self.min_lead);
        let spacing = (self.base_spacing + velocity / 3.0) as f64;

        let mut ids = Vec::with_capacity(pattern.steps.len());
        for step in &pattern.steps {
            let height = match (step.kind, step.height) {
                (_, Some(height)) => height,
                (ObstacleKind::Wall, None) => self.random_wall_height(),
                (ObstacleKind::BouncePad, None) => self.bounce_pad_height,
                (ObstacleKind::Spike, None) => self.spike_height,
            };
            let x = (self.furthest_spawn_position - distance) as f32;
            match registry.insert(step.kind, x, height, self.obstacle_width) {
                Ok(id) => ids.push(id),
                Err(e) => log::warn!("Pattern '{}' step skipped: {e}", pattern.name),
            }
            self.furthest_spawn_position += spacing;
        }

        log::debug!(
            "Spawned pattern '{}' ({} obstacles), cursor now {:.1}",
            pattern.name,
            ids.len(),
            self.furthest_spawn_position
        );
        ids
    }

    /// Uniform integer height in the configured range
    pub fn random_wall_height(&mut self) -> f32 {
        self.rng
            .random_range(self.wall_height_min..=self.wall_height_max) as f32
    }

    /// Back to the start of the track. The RNG stream continues.
    pub fn reset(&mut self) {
        self.furthest_spawn_position = self.initial_position;
        self.time_since_last_spawn = self.interval;
    }
}
