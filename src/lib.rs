//! Flappy Fire Pole - keep the character airborne, slip through the gaps
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, obstacles, collisions, game loop)
//! - `tuning`: Device-tier tuning tables and validation
//! - `platform`: Presentation and host abstractions
//! - `persistence`: LocalStorage helpers for scores and preferences
//! - `audio`: Sound effects driven by simulation events

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use highscores::HighScore;
pub use settings::{Character, Settings};
pub use tuning::{DeviceTier, TimingMode, TuningConfig};

/// Play-field constants shared by every device tier
pub mod consts {
    /// Distance from the top of the field the character may not rise above
    pub const CEILING_MARGIN: f32 = 20.0;
    /// Height of the ground strip at the bottom of the field
    pub const FLOOR_MARGIN: f32 = 20.0;
    /// Closest a gap may come to the top or bottom edge
    pub const MIN_GAP_MARGIN: f32 = 80.0;
    /// Horizontal thickness of a fire pole
    pub const POLE_WIDTH: f32 = 50.0;

    /// Frame duration the physics constants were tuned against (60 Hz)
    pub const BASELINE_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame delta fed to the integrator (tab switches, stalls)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
    /// Pause between the fatal frame and the game-over screen
    pub const SETTLE_DELAY_MS: f64 = 500.0;
    /// Mobile tiers skip frames that arrive faster than this
    pub const MOBILE_MIN_FRAME_MS: f64 = 16.0;
}
