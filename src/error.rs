//! Configuration errors
//!
//! The simulation itself has no failure modes; a bad tuning table is the only
//! thing that can stop a run from starting.

use thiserror::Error;

/// Why a [`TuningConfig`](crate::tuning::TuningConfig) was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("jump impulse must be negative (upward), got {0}")]
    JumpNotUpward(f32),

    #[error("spawn interval must be at least one frame")]
    ZeroSpawnInterval,

    #[error("player height {player_height} does not fit between ceiling and floor of a {field_height} tall field")]
    PlayerTooTall {
        player_height: f32,
        field_height: f32,
    },

    #[error("gap of {gap_height} leaves no spawn range in a {field_height} tall field (margin {margin})")]
    NoGapRange {
        gap_height: f32,
        field_height: f32,
        margin: f32,
    },

    #[error("gap of {gap_height} is narrower than the {player_height} tall player")]
    GapTooNarrow { gap_height: f32, player_height: f32 },

    #[error("frame delta cap must be positive, got {0} ms")]
    BadDeltaCap(f64),
}

/// Result type alias for configuration checks
pub type Result<T> = std::result::Result<T, ConfigError>;
