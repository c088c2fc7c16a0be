//! Frame-driven game loop
//!
//! [`GameLoop`] owns all run state and is advanced by the host once per
//! rendered frame. Within a tick the order is fixed: physics, clamp, spawn,
//! scroll/score/cull, collision. Ticks that arrive while the loop is not
//! `Running` do nothing, which makes stale frame callbacks harmless after a
//! pause or game over.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{CollisionKind, GameEvent, GamePhase, Obstacle, PlayerState, RunState};
use super::{collision, obstacles, physics};
use crate::consts::SETTLE_DELAY_MS;
use crate::error::Result;
use crate::tuning::{TimingMode, TuningConfig};

/// What a call to [`GameLoop::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (idle, paused or ended): nothing changed
    Ignored,
    /// Frame arrived too soon and was skipped
    Throttled,
    /// State advanced; schedule the next frame
    Continue,
    /// Collision ended the run on this frame
    GameOver,
}

/// Final result handed to the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u32,
    pub high_score: u32,
    pub new_record: bool,
}

/// Single owner of the simulation
#[derive(Debug, Clone)]
pub struct GameLoop {
    config: TuningConfig,
    player: PlayerState,
    run: RunState,
    rng: Pcg32,
    seed: u64,
    /// Timestamp the next frame delta is measured from
    last_frame_ms: f64,
    high_score: u32,
    /// When the run ended, for the settle delay
    ended_at_ms: Option<f64>,
    summary: Option<RunSummary>,
    events: Vec<GameEvent>,
}

impl GameLoop {
    /// Create an idle loop; fails if the tuning table is unusable
    pub fn new(config: TuningConfig, high_score: u32) -> Result<Self> {
        config.validate()?;
        let player = PlayerState::spawn(&config);
        Ok(Self {
            config,
            player,
            run: RunState::new(),
            rng: Pcg32::seed_from_u64(0),
            seed: 0,
            last_frame_ms: 0.0,
            high_score,
            ended_at_ms: None,
            summary: None,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &TuningConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.run.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.run.obstacles
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn score(&self) -> u32 {
        self.run.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Idle -> Running
    pub fn start(&mut self, seed: u64, now_ms: f64) -> bool {
        if self.run.phase != GamePhase::Idle {
            log::warn!("Ignoring start while {:?}", self.run.phase);
            return false;
        }

        self.reset();
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.run.phase = GamePhase::Running;
        self.last_frame_ms = now_ms;
        log::info!("Run started (seed {})", seed);
        true
    }

    /// Ended -> Idle -> Running
    pub fn restart(&mut self, seed: u64, now_ms: f64) -> bool {
        if self.run.phase != GamePhase::Ended {
            log::warn!("Ignoring restart while {:?}", self.run.phase);
            return false;
        }
        self.return_to_menu();
        self.start(seed, now_ms)
    }

    /// Ended/Paused -> Idle, discarding the run
    pub fn return_to_menu(&mut self) -> bool {
        match self.run.phase {
            GamePhase::Ended | GamePhase::Paused => {
                log::info!("Returning to menu");
                self.reset();
                true
            }
            phase => {
                log::warn!("Ignoring return to menu while {:?}", phase);
                false
            }
        }
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        if !self.run.is_running() {
            return false;
        }
        self.run.phase = GamePhase::Paused;
        log::info!("Paused at frame {}", self.run.frame_count);
        true
    }

    /// Paused -> Running; the frame clock restarts at `now_ms`
    pub fn resume(&mut self, now_ms: f64) -> bool {
        if !self.run.is_paused() {
            return false;
        }
        self.run.phase = GamePhase::Running;
        self.last_frame_ms = now_ms;
        log::info!("Resumed at frame {}", self.run.frame_count);
        true
    }

    /// Escape key / pause button
    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        match self.run.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(now_ms),
            _ => false,
        }
    }

    /// Apply the jump impulse; only while running
    pub fn request_jump(&mut self) -> bool {
        if !self.run.is_running() {
            return false;
        }
        physics::jump(&mut self.player, self.config.jump_impulse);
        self.events.push(GameEvent::Jump);
        true
    }

    /// Advance one frame
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if !self.run.is_running() {
            return TickOutcome::Ignored;
        }

        let scale = match self.config.timing {
            TimingMode::FixedStep => 1.0,
            TimingMode::DeltaTime { cap_ms } => {
                let elapsed = now_ms - self.last_frame_ms;
                if let Some(min_frame_ms) = self.config.min_frame_ms {
                    if elapsed < min_frame_ms {
                        return TickOutcome::Throttled;
                    }
                }
                physics::time_scale(elapsed, cap_ms)
            }
        };
        self.last_frame_ms = now_ms;
        self.run.frame_count += 1;

        physics::integrate(&mut self.player, self.config.gravity, scale);
        if let Some(kind) = physics::clamp_to_field(&mut self.player, &self.config) {
            self.latch_collision(kind);
        }

        obstacles::maybe_spawn(&mut self.run, &self.config, &mut self.rng);
        obstacles::advance(&mut self.run, &self.config, self.player.x(), &mut self.events);

        match collision::detect(&self.player, &self.run.obstacles, &self.config) {
            Some(kind) => {
                self.latch_collision(kind);
                self.end_run(now_ms);
                TickOutcome::GameOver
            }
            None => TickOutcome::Continue,
        }
    }

    /// Hand the run summary over once the settle delay has elapsed
    pub fn poll_game_over(&mut self, now_ms: f64) -> Option<RunSummary> {
        if self.run.phase != GamePhase::Ended {
            return None;
        }
        let ended_at = self.ended_at_ms?;
        if now_ms - ended_at < SETTLE_DELAY_MS {
            return None;
        }
        self.summary.take()
    }

    /// Fire the collision event at most once per run
    fn latch_collision(&mut self, kind: CollisionKind) {
        if !self.run.collision_latched {
            self.run.collision_latched = true;
            self.events.push(GameEvent::Collision(kind));
        }
    }

    fn end_run(&mut self, now_ms: f64) {
        let score = self.run.score;
        let new_record = score > self.high_score;
        if new_record {
            self.high_score = score;
            log::info!("New high score: {}", score);
        }

        self.run.phase = GamePhase::Ended;
        self.ended_at_ms = Some(now_ms);
        let summary = RunSummary {
            score,
            high_score: self.high_score,
            new_record,
        };
        self.summary = Some(summary);
        self.events.push(GameEvent::GameOver {
            score,
            high_score: self.high_score,
            new_record,
        });
        log::info!(
            "Game over at frame {} with score {}",
            self.run.frame_count,
            score
        );
    }

    fn reset(&mut self) {
        self.run = RunState::new();
        self.player = PlayerState::spawn(&self.config);
        self.ended_at_ms = None;
        self.summary = None;
        self.events.clear();
    }
}
