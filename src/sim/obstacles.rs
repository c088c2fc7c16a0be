//! Fire pole generation and scrolling
//!
//! Poles enter at the right edge on a fixed frame cadence with a random gap,
//! scroll left at constant speed, award a point once their trailing edge
//! passes the character, and are dropped once fully off-screen.

use rand::Rng;

use crate::tuning::TuningConfig;

use super::state::{GameEvent, Obstacle, RunState};

/// True when enough frames have elapsed since the last spawn
#[inline]
pub fn spawn_due(run: &RunState, config: &TuningConfig) -> bool {
    run.frame_count.saturating_sub(run.last_spawn_frame) >= u64::from(config.spawn_interval_frames)
}

/// Pick the top of a gap uniformly within the allowed band
pub fn sample_gap_top<R: Rng>(config: &TuningConfig, rng: &mut R) -> f32 {
    let (lo, hi) = config.gap_top_range();
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

/// Append a new obstacle at the right edge of the field
pub fn spawn<R: Rng>(run: &mut RunState, config: &TuningConfig, rng: &mut R) {
    let gap_top = sample_gap_top(config, rng);
    let obstacle = Obstacle {
        id: run.next_obstacle_id(),
        x: config.field_width,
        gap_top,
        gap_height: config.gap_height,
        passed: false,
    };
    log::debug!(
        "Spawned obstacle {} at frame {} (gap {:.0}..{:.0})",
        obstacle.id,
        run.frame_count,
        obstacle.gap_top,
        obstacle.gap_bottom()
    );
    run.obstacles.push(obstacle);
    run.last_spawn_frame = run.frame_count;
}

/// Spawn if the cadence says so; returns whether an obstacle was added
pub fn maybe_spawn<R: Rng>(run: &mut RunState, config: &TuningConfig, rng: &mut R) -> bool {
    if spawn_due(run, config) {
        spawn(run, config, rng);
        true
    } else {
        false
    }
}

/// Scroll every obstacle, award passes, and cull off-screen ones
///
/// Emits one [`GameEvent::Scored`] per obstacle that crossed `player_x` this
/// tick. Returns the number of points awarded.
pub fn advance(
    run: &mut RunState,
    config: &TuningConfig,
    player_x: f32,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut awarded = 0;

    for obstacle in run.obstacles.iter_mut() {
        obstacle.x -= config.obstacle_speed;

        if !obstacle.passed && obstacle.trailing_edge(config.pole_width) < player_x {
            obstacle.passed = true;
            run.score += 1;
            awarded += 1;
            events.push(GameEvent::Scored { score: run.score });
        }
    }

    let before = run.obstacles.len();
    let limit = -config.pole_width;
    run.obstacles.retain(|o| o.x >= limit);
    let culled = before - run.obstacles.len();
    if culled > 0 {
        log::debug!("Culled {} off-screen obstacle(s)", culled);
    }

    awarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MIN_GAP_MARGIN;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn obstacle_at(run: &mut RunState, x: f32) {
        let id = run.next_obstacle_id();
        run.obstacles.push(Obstacle {
            id,
            x,
            gap_top: 200.0,
            gap_height: 180.0,
            passed: false,
        });
    }

    #[test]
    fn test_spawn_cadence() {
        let config = TuningConfig::default();
        let mut run = RunState::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawn_frames = Vec::new();

        for _ in 0..500 {
            run.frame_count += 1;
            if maybe_spawn(&mut run, &config, &mut rng) {
                spawn_frames.push(run.frame_count);
            }
        }

        assert_eq!(spawn_frames, vec![120, 240, 360, 480]);
        for pair in spawn_frames.windows(2) {
            assert_eq!(pair[1] - pair[0], u64::from(config.spawn_interval_frames));
        }
    }

    #[test]
    fn test_spawn_at_right_edge() {
        let config = TuningConfig::default();
        let mut run = RunState::new();
        let mut rng = Pcg32::seed_from_u64(1);
        spawn(&mut run, &config, &mut rng);

        let o = &run.obstacles[0];
        assert_eq!(o.x, config.field_width);
        assert_eq!(o.gap_height, config.gap_height);
        assert!(!o.passed);
    }

    #[test]
    fn test_pass_scores_exactly_once() {
        let config = TuningConfig::default();
        let mut run = RunState::new();
        let mut events = Vec::new();
        obstacle_at(&mut run, 800.0);

        // First tick where 800 - 3n + 50 < 160
        let expected_step = ((800.0 + config.pole_width - 160.0) / config.obstacle_speed).floor() as u32 + 1;

        let mut scored_at = None;
        for step in 1..=300 {
            if advance(&mut run, &config, 160.0, &mut events) > 0 {
                assert!(scored_at.is_none(), "scored twice");
                scored_at = Some(step);
            }
        }

        assert_eq!(scored_at, Some(expected_step));
        assert_eq!(run.score, 1);
        assert_eq!(events, vec![GameEvent::Scored { score: 1 }]);
    }

    #[test]
    fn test_trailing_edge_exactly_at_player_does_not_score() {
        let config = TuningConfig::default();
        let mut run = RunState::new();
        let mut events = Vec::new();
        // After one step x = 110, trailing edge = 160: not strictly below
        obstacle_at(&mut run, 113.0);
        advance(&mut run, &config, 160.0, &mut events);
        assert_eq!(run.score, 0);
        advance(&mut run, &config, 160.0, &mut events);
        assert_eq!(run.score, 1);
    }

    #[test]
    fn test_cull_keeps_order() {
        let config = TuningConfig::default();
        let mut run = RunState::new();
        let mut events = Vec::new();
        obstacle_at(&mut run, -48.0);
        obstacle_at(&mut run, 300.0);
        obstacle_at(&mut run, 600.0);

        advance(&mut run, &config, 160.0, &mut events);

        let xs: Vec<f32> = run.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![297.0, 597.0]);
        // The culled one still scored on its way out
        assert_eq!(run.score, 1);
    }

    #[test]
    fn test_cull_boundary_is_inclusive() {
        let config = TuningConfig::default();
        let mut run = RunState::new();
        let mut events = Vec::new();
        obstacle_at(&mut run, -47.0);
        advance(&mut run, &config, 160.0, &mut events);
        assert_eq!(run.obstacles.len(), 1, "x == -pole_width stays");
        advance(&mut run, &config, 160.0, &mut events);
        assert!(run.obstacles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_gap_containment(seed in any::<u64>(), gap in 40.0f32..440.0) {
            let mut config = TuningConfig::default();
            config.gap_height = gap;
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..32 {
                let top = sample_gap_top(&config, &mut rng);
                prop_assert!(top >= MIN_GAP_MARGIN);
                prop_assert!(top + gap <= config.field_height - MIN_GAP_MARGIN + 1e-3);
            }
        }
    }
}
