//! Cube Dash headless runner
//!
//! Drives the simulation with a fixed-timestep loop and a simple autopilot,
//! the same way a render loop would, and keeps the best score on disk.
//!
//! Usage: `cube-dash [tuning.json] [seconds] [seed]`

use std::process::ExitCode;

use cube_dash::audio::{AudioCues, LogSink};
use cube_dash::consts::*;
use cube_dash::highscores::format_score;
use cube_dash::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
use cube_dash::sim::{ObstacleKind, RunController, TickReport};
use cube_dash::{HighScore, Tuning};

/// Frame rate of the simulated display
const FRAME_DT: f32 = 1.0 / 60.0;
/// Default location of the score file (override with CUBE_DASH_STORE)
const STORE_PATH: &str = "cube-dash-scores.json";

/// Game instance holding all state
struct Game {
    run: RunController,
    store: Box<dyn KeyValueStore>,
    high_score: HighScore,
    cues: AudioCues,
    sink: LogSink,
    accumulator: f32,
    deaths: u32,
    best_this_session: f64,
}

impl Game {
    fn new(run: RunController, store: Box<dyn KeyValueStore>, high_score: HighScore) -> Self {
        Self {
            run,
            store,
            high_score,
            cues: AudioCues::new(),
            sink: LogSink,
            accumulator: 0.0,
            deaths: 0,
            best_this_session: 0.0,
        }
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.autopilot();
            let report = self.run.tick(SIM_DT);
            self.handle_report(&report);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Jump when a wall or spike is about to reach the player
    fn autopilot(&mut self) {
        let player = self.run.player();
        if !player.is_grounded() && player.velocity > -2.0 {
            return;
        }
        let reach = self.run.state().velocity * 0.3;
        let threat = self.run.snapshot().into_iter().any(|o| {
            o.kind != ObstacleKind::BouncePad && o.x > 0.6 && o.x < 0.6 + reach
        });
        if threat {
            self.run.jump_input();
        }
    }

    fn handle_report(&mut self, report: &TickReport) {
        self.cues.dispatch(&report.events, &mut self.sink);

        if let Some(score) = report.final_score {
            self.deaths += 1;
            self.best_this_session = self.best_this_session.max(score);
            log::info!("Death #{} at {}", self.deaths, format_score(score));
        }

        if report.high_score_improved {
            let before = format_score(self.high_score.best);
            self.high_score.record(report.high_score);
            // Only hit the store when the stored text would change
            if format_score(self.high_score.best) != before {
                if let Err(e) = self.high_score.save(self.store.as_mut()) {
                    log::warn!("Failed to save high score: {e}");
                }
            }
        }
    }
}

fn open_store() -> Box<dyn KeyValueStore> {
    let path = std::env::var("CUBE_DASH_STORE").unwrap_or_else(|_| STORE_PATH.to_string());
    match JsonFileStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Score file {path} unusable ({e}); scores will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Cube Dash (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next().filter(|a| a != "-") {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Invalid tuning {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);

    let store = open_store();
    let high_score = HighScore::load(store.as_ref());

    let run = match RunController::new(tuning, seed) {
        Ok(run) => run.with_high_score(high_score.best),
        Err(e) => {
            log::error!("Invalid tuning: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut game = Game::new(run, store, high_score);
    game.run.start();

    let frames = (seconds / FRAME_DT).ceil() as u64;
    for _ in 0..frames {
        game.update(FRAME_DT);
    }

    let current = game.run.state().score;
    println!("Simulated {seconds:.0}s (seed {seed})");
    println!("  runs:          {}", game.run.state().runs);
    println!("  deaths:        {}", game.deaths);
    println!(
        "  best run:      {}",
        format_score(game.best_this_session.max(current))
    );
    println!("  high score:    {}", format_score(game.high_score.best));
    println!("  live obstacles {}", game.run.registry().len());

    ExitCode::SUCCESS
}
