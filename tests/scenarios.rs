use flappy_fire_pole::consts::{BASELINE_FRAME_MS, SETTLE_DELAY_MS};
use flappy_fire_pole::platform::{HeadlessPresenter, Presenter};
use flappy_fire_pole::sim::{
    CollisionKind, GameEvent, GameLoop, GamePhase, Obstacle, TickOutcome, autopilot, detect_collision,
    obstacles, physics,
};
use flappy_fire_pole::{DeviceTier, HighScore, TimingMode, TuningConfig};

fn fixed_step() -> TuningConfig {
    TuningConfig::for_tier(DeviceTier::Desktop).with_timing(TimingMode::FixedStep)
}

#[test]
fn test_free_fall_clamps_at_floor() {
    let config = fixed_step();
    let mut player = flappy_fire_pole::sim::PlayerState::spawn(&config);
    assert_eq!((player.x(), player.y()), (160.0, 300.0));

    let mut boundary_hits = 0;
    let mut latched = false;
    for _ in 0..60 {
        physics::integrate(&mut player, 0.5, 1.0);
        if physics::clamp_to_field(&mut player, &config).is_some() && !latched {
            latched = true;
            boundary_hits += 1;
        }
        assert!(player.y() >= config.min_y() && player.y() <= config.max_y());
    }

    assert_eq!(player.y(), 540.0);
    assert_eq!(player.vel_y, 0.0);
    assert_eq!(boundary_hits, 1);
}

#[test]
fn test_free_fall_ends_run_with_single_collision_event() {
    let mut game = GameLoop::new(fixed_step(), 0).unwrap();
    game.start(1, 0.0);

    let mut events = Vec::new();
    for frame in 0..60u32 {
        game.tick(f64::from(frame));
        events.extend(game.drain_events());
    }

    assert_eq!(game.phase(), GamePhase::Ended);
    assert_eq!(game.player().y(), 540.0);
    assert_eq!(game.player().vel_y, 0.0);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Collision(_)))
            .collect::<Vec<_>>(),
        vec![&GameEvent::Collision(CollisionKind::Floor)]
    );
}

#[test]
fn test_obstacle_pass_increments_score_once() {
    let config = fixed_step();
    let mut run = flappy_fire_pole::sim::RunState::new();
    run.obstacles.push(Obstacle {
        id: 1,
        x: 800.0,
        gap_top: 200.0,
        gap_height: 180.0,
        passed: false,
    });

    let mut events = Vec::new();
    let mut flipped_at = None;
    for step in 1..=280u32 {
        let was_passed = run.obstacles.first().is_some_and(|o| o.passed);
        obstacles::advance(&mut run, &config, 160.0, &mut events);
        let now_passed = run.obstacles.first().is_some_and(|o| o.passed);
        if !was_passed && now_passed {
            assert!(flipped_at.is_none());
            flipped_at = Some(step);
            let o = &run.obstacles[0];
            assert!(o.x + config.pole_width < 160.0);
            assert!(o.x + config.obstacle_speed + config.pole_width >= 160.0);
        }
    }

    assert!(flipped_at.is_some());
    assert_eq!(run.score, 1);
    assert_eq!(events, vec![GameEvent::Scored { score: 1 }]);
}

#[test]
fn test_pole_overlap_detected() {
    let config = fixed_step();
    let mut player = flappy_fire_pole::sim::PlayerState::spawn(&config);
    player.pos.y = 300.0;

    let hit = Obstacle {
        id: 1,
        x: 150.0,
        gap_top: 320.0,
        gap_height: 180.0,
        passed: false,
    };
    assert!(detect_collision(&player, &[hit], &config));

    let clear = Obstacle {
        id: 2,
        x: 150.0,
        gap_top: 250.0,
        gap_height: 180.0,
        passed: false,
    };
    assert!(!detect_collision(&player, &[clear], &config));
}

#[test]
fn test_pause_does_not_accumulate_time() {
    let config = TuningConfig::for_tier(DeviceTier::Desktop);
    let mut game = GameLoop::new(config, 0).unwrap();
    game.start(3, 1000.0);

    let mut now = 1000.0;
    for _ in 0..5 {
        now += BASELINE_FRAME_MS;
        game.tick(now);
    }
    let step_before = {
        let v0 = game.player().vel_y;
        now += BASELINE_FRAME_MS;
        game.tick(now);
        game.player().vel_y - v0
    };

    assert!(game.pause());
    assert!(!game.pause());
    for _ in 0..10 {
        assert_eq!(game.tick(now + 2500.0), TickOutcome::Ignored);
    }

    now += 5000.0;
    assert!(game.resume(now));
    assert!(!game.resume(now));
    let v0 = game.player().vel_y;
    now += BASELINE_FRAME_MS;
    assert_eq!(game.tick(now), TickOutcome::Continue);
    let step_after = game.player().vel_y - v0;

    assert!((step_after - step_before).abs() < 1e-4);
}

#[test]
fn test_spawns_are_evenly_spaced() {
    let config = fixed_step();
    let interval = u64::from(config.spawn_interval_frames);
    let mut game = GameLoop::new(config, 0).unwrap();
    game.start(11, 0.0);

    let mut spawn_frames = Vec::new();
    let mut seen = 0;
    for frame in 0..400u32 {
        if autopilot::wants_jump(&game) {
            game.request_jump();
        }
        if game.tick(f64::from(frame)) != TickOutcome::Continue {
            break;
        }
        let newest = game.obstacles().last().map(|o| o.id).unwrap_or(0);
        if newest > seen {
            seen = newest;
            spawn_frames.push(game.run_state().frame_count);
        }
    }

    assert!(spawn_frames.len() >= 2, "spawned at {:?}", spawn_frames);
    for pair in spawn_frames.windows(2) {
        assert_eq!(pair[1] - pair[0], interval);
    }
}

#[test]
fn test_game_over_hands_off_high_score() {
    let mut store = HighScore::new(0);
    let mut presenter = HeadlessPresenter::default();
    let mut game = GameLoop::new(fixed_step(), store.best()).unwrap();
    game.start(8, 0.0);

    let mut now = 0.0;
    while game.tick(now) == TickOutcome::Continue {
        presenter.render(game.player(), game.obstacles());
        now += BASELINE_FRAME_MS;
    }
    assert_eq!(game.phase(), GamePhase::Ended);
    assert_eq!(game.tick(now + 1.0), TickOutcome::Ignored);

    let mut reported = 0;
    for event in game.drain_events() {
        if let GameEvent::GameOver { score, .. } = event {
            store.report(score);
            reported += 1;
        }
    }
    assert_eq!(reported, 1);

    assert!(game.poll_game_over(now).is_none(), "settle delay first");
    let summary = game.poll_game_over(now + SETTLE_DELAY_MS).unwrap();
    presenter.show_game_over(&summary);

    assert_eq!(presenter.summary, Some(summary));
    assert_eq!(store.best(), summary.high_score);

    assert!(game.restart(9, now + 1000.0));
    assert_eq!(game.phase(), GamePhase::Running);
    assert!(game.obstacles().is_empty());
    assert_eq!(game.score(), 0);
}

#[test]
fn test_invalid_config_never_starts() {
    let mut config = fixed_step();
    config.gap_height = 450.0;
    assert!(GameLoop::new(config, 0).is_err());

    let mut config = fixed_step();
    config.gap_height = config.player_height / 2.0;
    assert!(GameLoop::new(config, 0).is_err());
}
