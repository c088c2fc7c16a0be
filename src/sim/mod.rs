//! Frame-driven simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! audio or storage:
//! - Seeded RNG only (gap positions)
//! - Obstacles kept in spawn order
//! - Physics, generation and collision are plain functions over state owned
//!   by [`GameLoop`]

pub mod autopilot;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Aabb, detect, detect_collision};
pub use state::{CollisionKind, GameEvent, GamePhase, Obstacle, PlayerState, RunState};
pub use tick::{GameLoop, RunSummary, TickOutcome};
