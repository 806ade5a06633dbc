//! Per-tick simulation step
//!
//! Order within a running tick:
//!   1. Advance run time
//!   2. Integrate player physics
//!   3. Spawn patterns
//!   4. Scroll and cull obstacles
//!   5. Resolve collisions
//!   6. Score and difficulty

use rand::Rng;

use super::collision::{self, Outcome};
use super::state::{GameEvent, RunController, RunPhase, TickReport};

impl<R: Rng> RunController<R> {
    /// Advance the simulation by `dt` seconds.
    ///
    /// Negative or non-finite deltas are rejected with no effect. Outside
    /// `Running` nothing moves; a paused controller refuses nonzero deltas.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("tick rejected: invalid delta {dt}");
            return self.report(Outcome::None, Vec::new(), None);
        }

        match self.state.phase {
            RunPhase::Running => {}
            RunPhase::Paused => {
                if dt > 0.0 {
                    log::trace!("tick rejected while paused (dt {dt})");
                }
                return self.report(Outcome::None, Vec::new(), None);
            }
            RunPhase::Idle | RunPhase::GameOver => {
                return self.report(Outcome::None, Vec::new(), None);
            }
        }

        self.state.elapsed += dt as f64;
        self.state.ticks += 1;
        let velocity = self.state.velocity;

        self.player.integrate(dt, self.tuning.gravity);

        let spawned =
            self.spawner
                .update(dt, velocity, self.state.distance, &mut self.registry);

        let leading_edge = self.registry.advance(dt, velocity);
        self.state.distance += velocity as f64 * dt as f64;
        let culled = self.registry.cull(self.tuning.removal_threshold);
        self.pending_despawned.extend(culled.iter().map(|o| o.id));

        let outcome = collision::resolve(&mut self.player, &self.registry, &self.collision);
        match outcome {
            Outcome::Lethal => {
                let final_score = self.end_run();
                let mut report = self.report(outcome, spawned, leading_edge);
                report.terminal = true;
                report.final_score = Some(final_score);
                return report;
            }
            Outcome::Landed(_) => {
                if !self.on_wall {
                    log::debug!("Landed on wall at y={:.2}", self.player.y);
                    self.events.push(GameEvent::Landed);
                }
                self.on_wall = true;
                self.on_pad = false;
            }
            Outcome::Bounced => {
                if !self.on_pad {
                    log::debug!("Bounced");
                    self.events.push(GameEvent::Bounced);
                }
                self.on_pad = true;
                self.on_wall = false;
            }
            Outcome::None => {
                self.on_wall = false;
                self.on_pad = false;
            }
        }

        let improved = self.accumulate_score(dt);
        self.state.velocity = self.tuning.velocity_at(self.state.elapsed);

        let mut report = self.report(outcome, spawned, leading_edge);
        report.high_score_improved = improved;
        report
    }

    /// Returns true when the best score moved this tick
    fn accumulate_score(&mut self, dt: f32) -> bool {
        self.state.score += dt as f64 * self.tuning.score_rate;
        if self.state.score <= self.state.high_score {
            return false;
        }
        self.state.high_score = self.state.score;
        if !self.high_score_announced {
            self.high_score_announced = true;
            self.events.push(GameEvent::NewHighScore(self.state.score));
        }
        true
    }

    fn report(
        &mut self,
        outcome: Outcome,
        spawned: Vec<u32>,
        leading_edge: Option<f32>,
    ) -> TickReport {
        TickReport {
            phase: self.state.phase,
            score: self.state.score,
            high_score: self.state.high_score,
            velocity: self.state.velocity,
            terminal: false,
            final_score: None,
            outcome,
            high_score_improved: false,
            leading_edge,
            spawned,
            despawned: std::mem::take(&mut self.pending_despawned),
            events: std::mem::take(&mut self.events),
        }
    }
}
