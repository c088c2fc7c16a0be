//! Data-driven game balance
//!
//! Each device tier gets its own table of physics and spawn constants. The
//! simulation reads a validated [`TuningConfig`] and never changes it during
//! a run.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Coarse device classification, used only to pick tuning constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceTier {
    #[default]
    Desktop,
    Mobile,
    LowEndMobile,
}

impl DeviceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceTier::Desktop => "Desktop",
            DeviceTier::Mobile => "Mobile",
            DeviceTier::LowEndMobile => "LowEndMobile",
        }
    }

    pub fn is_mobile(&self) -> bool {
        !matches!(self, DeviceTier::Desktop)
    }
}

/// How frame time feeds the integrator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimingMode {
    /// Every tick is exactly one baseline step
    FixedStep,
    /// Gravity scales with elapsed time, capped at `cap_ms`
    DeltaTime { cap_ms: f64 },
}

impl Default for TimingMode {
    fn default() -> Self {
        TimingMode::DeltaTime {
            cap_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

/// Immutable per-run tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Downward acceleration per baseline step
    pub gravity: f32,
    /// Horizontal pole speed (pixels per tick)
    pub obstacle_speed: f32,
    /// Ticks between consecutive spawns
    pub spawn_interval_frames: u32,
    /// Height of the passable band
    pub gap_height: f32,
    /// Velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    pub field_width: f32,
    pub field_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub pole_width: f32,
    pub timing: TimingMode,
    /// Ticks arriving sooner than this are skipped (mobile battery saver)
    #[serde(default)]
    pub min_frame_ms: Option<f64>,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self::for_tier(DeviceTier::Desktop)
    }
}

impl TuningConfig {
    /// Preset table for a device tier on an 800x600 field
    pub fn for_tier(tier: DeviceTier) -> Self {
        let (gravity, obstacle_speed, spawn_interval_frames, gap_height, jump_impulse) = match tier
        {
            DeviceTier::Desktop => (0.5, 3.0, 120, 180.0, -9.0),
            DeviceTier::Mobile => (0.45, 2.5, 180, 160.0, -7.0),
            DeviceTier::LowEndMobile => (0.4, 2.0, 200, 160.0, -7.0),
        };

        Self {
            gravity,
            obstacle_speed,
            spawn_interval_frames,
            gap_height,
            jump_impulse,
            field_width: 800.0,
            field_height: 600.0,
            player_width: 40.0,
            player_height: 40.0,
            pole_width: POLE_WIDTH,
            timing: TimingMode::default(),
            min_frame_ms: tier.is_mobile().then_some(MOBILE_MIN_FRAME_MS),
        }
    }

    pub fn with_field(mut self, width: f32, height: f32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    pub fn with_player(mut self, width: f32, height: f32) -> Self {
        self.player_width = width;
        self.player_height = height;
        self
    }

    pub fn with_timing(mut self, timing: TimingMode) -> Self {
        self.timing = timing;
        self
    }

    /// Highest the character's top edge may go
    #[inline]
    pub fn min_y(&self) -> f32 {
        CEILING_MARGIN
    }

    /// Lowest the character's top edge may go
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.field_height - FLOOR_MARGIN - self.player_height
    }

    /// Inclusive range the top of a gap is sampled from
    #[inline]
    pub fn gap_top_range(&self) -> (f32, f32) {
        (
            MIN_GAP_MARGIN,
            self.field_height - self.gap_height - MIN_GAP_MARGIN,
        )
    }

    /// Reject tables that would produce a degenerate or unwinnable run
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("gravity", self.gravity),
            ("obstacle_speed", self.obstacle_speed),
            ("gap_height", self.gap_height),
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("pole_width", self.pole_width),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !(self.jump_impulse.is_finite() && self.jump_impulse < 0.0) {
            return Err(ConfigError::JumpNotUpward(self.jump_impulse));
        }
        if self.spawn_interval_frames == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if let TimingMode::DeltaTime { cap_ms } = self.timing {
            if !(cap_ms.is_finite() && cap_ms > 0.0) {
                return Err(ConfigError::BadDeltaCap(cap_ms));
            }
        }
        if self.max_y() <= self.min_y() {
            return Err(ConfigError::PlayerTooTall {
                player_height: self.player_height,
                field_height: self.field_height,
            });
        }
        // Strict overlap: a gap exactly as tall as the player is passable
        if self.gap_height < self.player_height {
            return Err(ConfigError::GapTooNarrow {
                gap_height: self.gap_height,
                player_height: self.player_height,
            });
        }

        let (lo, hi) = self.gap_top_range();
        if hi < lo {
            return Err(ConfigError::NoGapRange {
                gap_height: self.gap_height,
                field_height: self.field_height,
                margin: MIN_GAP_MARGIN,
            });
        }

        Ok(())
    }
}
