//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Presentation (DOM transforms on web, headless counters natively)
//! - Device tier detection

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{Obstacle, PlayerState, RunSummary};
use crate::tuning::DeviceTier;

/// Turns simulation state into something visible
///
/// Called by the host once per tick after the state update. The simulation
/// never reads anything back.
pub trait Presenter {
    fn render(&mut self, player: &PlayerState, obstacles: &[Obstacle]);

    fn show_score(&mut self, _score: u32) {}

    fn show_game_over(&mut self, _summary: &RunSummary) {}
}

/// Presenter with no output, for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct HeadlessPresenter {
    pub frames: u64,
    pub max_live_obstacles: usize,
    pub score: u32,
    pub summary: Option<RunSummary>,
}

impl Presenter for HeadlessPresenter {
    fn render(&mut self, _player: &PlayerState, obstacles: &[Obstacle]) {
        self.frames += 1;
        self.max_live_obstacles = self.max_live_obstacles.max(obstacles.len());
    }

    fn show_score(&mut self, score: u32) {
        self.score = score;
    }

    fn show_game_over(&mut self, summary: &RunSummary) {
        self.summary = Some(*summary);
    }
}

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// `prefix` followed by a character in `lo..=hi`, then `suffix`
fn has_version(ua: &str, prefix: &str, lo: char, hi: char, suffix: &str) -> bool {
    ua.match_indices(prefix).any(|(idx, _)| {
        let rest = &ua[idx + prefix.len()..];
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if (lo..=hi).contains(&c) => chars.as_str().starts_with(suffix),
            _ => false,
        }
    })
}

/// Classify a browser user-agent string
pub fn detect_tier(user_agent: &str) -> DeviceTier {
    let ua = user_agent.to_lowercase();
    if !MOBILE_MARKERS.iter().any(|m| ua.contains(m)) {
        return DeviceTier::Desktop;
    }

    let old = has_version(&ua, "android ", '2', '4', "")
        || has_version(&ua, "ios ", '1', '9', "_")
        || has_version(&ua, "iphone ", '1', '4', "");
    if old {
        DeviceTier::LowEndMobile
    } else {
        DeviceTier::Mobile
    }
}
