//! Game state and core simulation types
//!
//! Everything the game loop mutates during a run lives here, owned by
//! [`GameLoop`](super::tick::GameLoop).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::TuningConfig;

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// No run in progress (menus)
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run frozen, no ticks processed
    Paused,
    /// Run finished, waiting for restart or menu
    Ended,
}

/// What the character ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Ceiling,
    Floor,
    Pole,
}

/// Discrete events emitted by the simulation for audio/HUD/persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump was applied
    Jump,
    /// First contact with a boundary or pole this run
    Collision(CollisionKind),
    /// An obstacle was cleared; carries the new score
    Scored { score: u32 },
    /// Run finished
    GameOver {
        score: u32,
        high_score: u32,
        new_record: bool,
    },
}

/// The player-controlled character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    /// Vertical velocity (positive = down)
    pub vel_y: f32,
    /// Bounding box size
    pub size: Vec2,
}

impl PlayerState {
    /// Spawn at 20% across, half-way down the field
    pub fn spawn(config: &TuningConfig) -> Self {
        Self {
            pos: Vec2::new(config.field_width * 0.2, config.field_height / 2.0),
            vel_y: 0.0,
            size: Vec2::new(config.player_width, config.player_height),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Nose-up/nose-down angle for rendering
    pub fn tilt_degrees(&self) -> f32 {
        (self.vel_y * 2.0).clamp(-25.0, 25.0)
    }
}

/// A pair of fire poles with a passable gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Run-unique identity (lets renderers keep their own handles)
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Bottom of the top pole
    pub gap_top: f32,
    pub gap_height: f32,
    /// Set once the trailing edge has passed the character
    pub passed: bool,
}

impl Obstacle {
    /// Top of the bottom pole
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    /// Trailing (right) edge
    #[inline]
    pub fn trailing_edge(&self, pole_width: f32) -> f32 {
        self.x + pole_width
    }
}

/// Per-run aggregate state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    pub score: u32,
    /// Ticks simulated this run
    pub frame_count: u64,
    /// Frame of the most recent spawn (0 before the first)
    pub last_spawn_frame: u64,
    /// Live obstacles in spawn order (also left-to-right)
    pub obstacles: Vec<Obstacle>,
    /// Collision/boundary event already fired this run
    pub collision_latched: bool,
    /// Next obstacle ID
    next_id: u32,
}

impl RunState {
    /// Fresh state for a new run
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_spawn_position() {
        let player = PlayerState::spawn(&TuningConfig::default());
        assert_eq!(player.pos, Vec2::new(160.0, 300.0));
        assert_eq!(player.vel_y, 0.0);
        assert_eq!(player.size, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_tilt_is_clamped() {
        let mut player = PlayerState::spawn(&TuningConfig::default());
        player.vel_y = -9.0;
        assert_eq!(player.tilt_degrees(), -18.0);
        player.vel_y = 40.0;
        assert_eq!(player.tilt_degrees(), 25.0);
    }

    #[test]
    fn test_obstacle_ids_are_unique() {
        let mut run = RunState::new();
        let a = run.next_obstacle_id();
        let b = run.next_obstacle_id();
        assert_ne!(a, b);
        assert!(!run.is_running());
        assert!(!run.is_paused());
    }
}
