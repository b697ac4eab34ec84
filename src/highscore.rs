//! Best-score tracking
//!
//! A single number persisted under a fixed key. Read once at startup,
//! written at most once per finished game.

use crate::persistence::{Storage, load_json, save_json};

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HighScore {
    best: Option<f64>,
}

impl HighScore {
    /// Storage key (kept from the first timed release so old scores survive)
    pub const STORAGE_KEY: &'static str = "timed_highscore";

    pub fn new(best: Option<f64>) -> Self {
        Self { best }
    }

    pub fn best(&self) -> Option<f64> {
        self.best
    }

    /// Check if a final score beats the stored one (or nothing is stored)
    pub fn qualifies(&self, score: f64) -> bool {
        self.best.is_none_or(|best| score > best)
    }

    /// Record a final score; returns true if it became the new best
    pub fn record(&mut self, score: f64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = Some(score);
        true
    }

    /// Load from storage; absent or unreadable values mean "no high score"
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<f64>(storage, Self::STORAGE_KEY) {
            Ok(Some(best)) => {
                log::info!("Loaded high score {best:.1}");
                Self::new(Some(best))
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read high score: {e}");
                Self::default()
            }
        }
    }

    /// Best-effort save; failures are logged and otherwise ignored
    pub fn save(&self, storage: &mut dyn Storage) {
        let Some(best) = self.best else {
            return;
        };
        match save_json(storage, Self::STORAGE_KEY, &best) {
            Ok(()) => log::info!("High score saved ({best:.1})"),
            Err(e) => log::warn!("Could not save high score: {e}"),
        }
    }
}
