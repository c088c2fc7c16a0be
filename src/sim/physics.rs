//! Vertical physics for the character
//!
//! Integration is semi-implicit Euler: velocity first, then position with the
//! new velocity. Positions are clamped between ceiling and floor afterwards.

use crate::consts::BASELINE_FRAME_MS;
use crate::tuning::TuningConfig;

use super::state::{CollisionKind, PlayerState};

/// Convert an elapsed frame time into baseline steps, capped at `cap_ms`
pub fn time_scale(elapsed_ms: f64, cap_ms: f64) -> f32 {
    (elapsed_ms.clamp(0.0, cap_ms) / BASELINE_FRAME_MS) as f32
}

/// Advance velocity and position by one tick
pub fn integrate(player: &mut PlayerState, gravity: f32, time_scale: f32) {
    player.vel_y += gravity * time_scale;
    player.pos.y += player.vel_y;
}

/// Override vertical velocity with the jump impulse
#[inline]
pub fn jump(player: &mut PlayerState, impulse: f32) {
    player.vel_y = impulse;
}

/// Keep the character inside `[min_y, max_y]`
///
/// Returns which boundary was hit, if any. Velocity is zeroed whenever a
/// clamp is applied.
pub fn clamp_to_field(player: &mut PlayerState, config: &TuningConfig) -> Option<CollisionKind> {
    let min_y = config.min_y();
    let max_y = config.max_y();

    if player.pos.y < min_y {
        player.pos.y = min_y;
        player.vel_y = 0.0;
        Some(CollisionKind::Ceiling)
    } else if player.pos.y > max_y {
        player.pos.y = max_y;
        player.vel_y = 0.0;
        Some(CollisionKind::Floor)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DELTA_MS;
    use proptest::prelude::*;

    fn player() -> PlayerState {
        PlayerState::spawn(&TuningConfig::default())
    }

    #[test]
    fn test_time_scale_baseline() {
        assert!((time_scale(BASELINE_FRAME_MS, MAX_FRAME_DELTA_MS) - 1.0).abs() < 1e-6);
        assert!((time_scale(2.0 * BASELINE_FRAME_MS, MAX_FRAME_DELTA_MS) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_time_scale_caps_long_gaps() {
        // A 5 second stall must not become a 300-step jump
        let scale = time_scale(5000.0, MAX_FRAME_DELTA_MS);
        assert!((scale - 6.0).abs() < 1e-4);
        assert_eq!(time_scale(-3.0, MAX_FRAME_DELTA_MS), 0.0);
    }

    #[test]
    fn test_integrate_uses_new_velocity() {
        let mut p = player();
        integrate(&mut p, 0.5, 1.0);
        assert_eq!(p.vel_y, 0.5);
        assert_eq!(p.pos.y, 300.5);
        integrate(&mut p, 0.5, 1.0);
        assert_eq!(p.vel_y, 1.0);
        assert_eq!(p.pos.y, 301.5);
    }

    #[test]
    fn test_jump_overrides_velocity() {
        let mut p = player();
        p.vel_y = 12.0;
        jump(&mut p, -9.0);
        assert_eq!(p.vel_y, -9.0);
        p.vel_y = -20.0;
        jump(&mut p, -9.0);
        assert_eq!(p.vel_y, -9.0);
    }

    #[test]
    fn test_clamp_ceiling_and_floor() {
        let config = TuningConfig::default();

        let mut p = player();
        p.pos.y = -50.0;
        p.vel_y = -9.0;
        assert_eq!(clamp_to_field(&mut p, &config), Some(CollisionKind::Ceiling));
        assert_eq!((p.pos.y, p.vel_y), (20.0, 0.0));

        p.pos.y = 900.0;
        p.vel_y = 14.0;
        assert_eq!(clamp_to_field(&mut p, &config), Some(CollisionKind::Floor));
        assert_eq!((p.pos.y, p.vel_y), (540.0, 0.0));

        p.pos.y = 300.0;
        p.vel_y = 3.0;
        assert_eq!(clamp_to_field(&mut p, &config), None);
        assert_eq!(p.vel_y, 3.0);
    }

    proptest! {
        #[test]
        fn prop_clamp_invariant(y in -2000.0f32..2000.0, v in -50.0f32..50.0) {
            let config = TuningConfig::default();
            let mut p = player();
            p.pos.y = y;
            p.vel_y = v;
            let hit = clamp_to_field(&mut p, &config);
            prop_assert!(p.pos.y >= config.min_y() && p.pos.y <= config.max_y());
            if hit.is_some() {
                prop_assert_eq!(p.vel_y, 0.0);
            } else {
                prop_assert_eq!(p.vel_y, v);
            }
        }

        #[test]
        fn prop_time_scale_bounded(elapsed in -1000.0f64..100_000.0) {
            let scale = time_scale(elapsed, MAX_FRAME_DELTA_MS);
            prop_assert!(scale >= 0.0);
            prop_assert!(scale <= (MAX_FRAME_DELTA_MS / BASELINE_FRAME_MS) as f32 + 1e-4);
        }
    }
}
