//! Collision detection between the character and the play field
//!
//! Everything is an axis-aligned box: the character, and the two poles of
//! each obstacle (top pole from the ceiling down to the gap, bottom pole from
//! the gap down to the field's bottom edge). Overlap uses strict
//! inequalities, so boxes that merely touch do not collide.

use glam::Vec2;

use crate::tuning::TuningConfig;

use super::state::{CollisionKind, Obstacle, PlayerState};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Bounding box of the character
#[inline]
pub fn player_box(player: &PlayerState) -> Aabb {
    Aabb::from_pos_size(player.pos, player.size)
}

/// Top and bottom pole rectangles of an obstacle
pub fn pole_boxes(obstacle: &Obstacle, pole_width: f32, field_height: f32) -> [Aabb; 2] {
    let left = obstacle.x;
    let right = obstacle.x + pole_width;
    [
        Aabb::new(Vec2::new(left, 0.0), Vec2::new(right, obstacle.gap_top)),
        Aabb::new(
            Vec2::new(left, obstacle.gap_bottom()),
            Vec2::new(right, field_height),
        ),
    ]
}

/// Ceiling/floor contact: at or beyond either clamp boundary
pub fn boundary_contact(player: &PlayerState, config: &TuningConfig) -> Option<CollisionKind> {
    if player.pos.y <= config.min_y() {
        Some(CollisionKind::Ceiling)
    } else if player.pos.y >= config.max_y() {
        Some(CollisionKind::Floor)
    } else {
        None
    }
}

/// First thing the character is touching, if anything
///
/// Boundary contact wins over poles and short-circuits the obstacle scan.
pub fn detect(
    player: &PlayerState,
    obstacles: &[Obstacle],
    config: &TuningConfig,
) -> Option<CollisionKind> {
    if let Some(kind) = boundary_contact(player, config) {
        return Some(kind);
    }

    let bounds = player_box(player);
    obstacles
        .iter()
        .any(|o| {
            pole_boxes(o, config.pole_width, config.field_height)
                .iter()
                .any(|pole| bounds.overlaps(pole))
        })
        .then_some(CollisionKind::Pole)
}

/// Boolean form of [`detect`]
#[inline]
pub fn detect_collision(player: &PlayerState, obstacles: &[Obstacle], config: &TuningConfig) -> bool {
    detect(player, obstacles, config).is_some()
}
