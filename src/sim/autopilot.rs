//! Demo mode - the game plays itself
//!
//! Steers toward the centre of the nearest gap still ahead of the character,
//! jumping only while falling below it.

use super::tick::GameLoop;

/// How far below the target the character may sink before flapping
const SINK_TOLERANCE: f32 = 15.0;

/// Vertical centre the autopilot is aiming for
pub fn target_y(game: &GameLoop) -> f32 {
    let config = game.config();
    let player_x = game.player().x();
    game.obstacles()
        .iter()
        .find(|o| o.trailing_edge(config.pole_width) >= player_x)
        .map(|o| o.gap_top + o.gap_height / 2.0)
        .unwrap_or(config.field_height / 2.0)
}

/// Whether to jump this frame
pub fn wants_jump(game: &GameLoop) -> bool {
    let player = game.player();
    let centre = player.y() + player.size.y / 2.0;
    player.vel_y > 0.0 && centre > target_y(game) + SINK_TOLERANCE
}
