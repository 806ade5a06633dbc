//! Best score tracking
//!
//! Stored as a one-decimal string under a single key, the same shape the
//! browser build keeps in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: f64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: f64) -> Self {
        Self { best: best.max(0.0) }
    }

    /// Read the stored best. Missing or unreadable values start at zero.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::default();
        };
        match raw.trim().parse::<f64>() {
            Ok(best) if best.is_finite() && best >= 0.0 => {
                log::info!("Loaded high score {}", format_score(best));
                Self { best }
            }
            _ => {
                log::warn!("Ignoring unreadable high score {raw:?}");
                Self::default()
            }
        }
    }

    /// Take `score` if it beats the current best. Returns true when it did.
    pub fn record(&mut self, score: f64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(Self::STORAGE_KEY, &format_score(self.best))
    }
}

/// Scores are shown and stored with one decimal
pub fn format_score(score: f64) -> String {
    format!("{score:.1}")
}
