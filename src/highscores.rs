//! Best-score tracking
//!
//! Only a single best score is kept, persisted to LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence;

/// The all-time best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flappyFirePoleHighScore";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a finished run; returns true if it set a new best
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Final score of a run, reported as soon as it ends; persists a new best
    pub fn report(&mut self, score: u32) -> bool {
        let improved = self.record(score);
        if improved {
            log::info!("High score saved: {}", self.best);
            self.save();
        }
        improved
    }

    /// Load from storage, defaulting to zero
    pub fn load() -> Self {
        match persistence::load::<u32>(Self::STORAGE_KEY) {
            Some(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        persistence::save(Self::STORAGE_KEY, &self.best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_improvements() {
        let mut hs = HighScore::new(5);
        assert!(!hs.record(3));
        assert!(!hs.record(5));
        assert!(hs.record(6));
        assert_eq!(hs.best(), 6);
    }

    #[test]
    fn test_report_final_score() {
        let mut hs = HighScore::default();
        assert!(hs.report(9));
        assert!(!hs.report(9));
        assert_eq!(hs.best(), 9);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_load_is_empty() {
        assert_eq!(HighScore::load().best(), 0);
    }
}
