//! Sound effects and music
//!
//! The simulation only emits [`GameEvent`]s; this module decides what they
//! sound like. Playback is procedural Web Audio (no files), wasm32 only.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Character flapped
    Jump,
    /// Hit a pole, the ceiling or the floor
    Collision,
    /// Passed a pole pair
    Score,
    /// Character's line on the game-over screen
    Dialogue,
    /// Beat the stored best
    HighScore,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::Collision(_) => Some(SoundEffect::Collision),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::GameOver {
                new_record: true, ..
            } => Some(SoundEffect::HighScore),
            GameEvent::GameOver { .. } => None,
        }
    }

    /// Per-effect mix level
    pub fn volume(&self) -> f32 {
        match self {
            SoundEffect::Jump => 0.2,
            SoundEffect::Collision => 0.4,
            SoundEffect::Score => 0.2,
            SoundEffect::Dialogue => 0.5,
            SoundEffect::HighScore => 0.4,
        }
    }
}

/// Background music level
pub const MUSIC_VOLUME: f32 = 0.3;

/// One voice in a short cue: `(offset s, start Hz, end Hz, length s)`
pub type Glide = (f64, f32, f32, f64);

/// Dialogue - four mumbled syllables, each sagging in pitch like a sigh
pub const DIALOGUE: [Glide; 4] = [
    (0.00, 260.0, 210.0, 0.14),
    (0.18, 240.0, 190.0, 0.12),
    (0.34, 250.0, 170.0, 0.16),
    (0.62, 200.0, 110.0, 0.45),
];

/// High score - fanfare, a held chord after a quick run up
pub const FANFARE: [Glide; 5] = [
    (0.00, 523.0, 523.0, 0.09),
    (0.09, 659.0, 659.0, 0.09),
    (0.18, 784.0, 784.0, 0.09),
    (0.30, 1047.0, 1047.0, 0.5),
    (0.30, 784.0, 784.0, 0.5),
];

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{DIALOGUE, FANFARE, Glide, MUSIC_VOLUME, SoundEffect};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        enabled: bool,
        music: Option<(OscillatorNode, OscillatorNode, GainNode)>,
        /// Dialogue already played for this run
        dialogue_played: bool,
    }

    impl AudioManager {
        pub fn new(enabled: bool) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                enabled,
                music: None,
                dialogue_played: false,
            }
        }

        /// Music toggle; stops anything playing when disabled
        pub fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
            if !enabled {
                self.stop_music();
            }
        }

        /// New run: the dialogue may play again
        pub fn reset_run(&mut self) {
            self.dialogue_played = false;
        }

        /// Play a sound effect
        pub fn play(&mut self, effect: SoundEffect) {
            if !self.enabled {
                return;
            }
            let Some(ctx) = self.ctx.as_ref() else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let vol = effect.volume();
            match effect {
                SoundEffect::Jump => play_jump(ctx, vol),
                SoundEffect::Collision => play_collision(ctx, vol),
                SoundEffect::Score => play_score(ctx, vol),
                SoundEffect::Dialogue => {
                    if self.dialogue_played {
                        return;
                    }
                    self.dialogue_played = true;
                    play_dialogue(ctx, vol);
                }
                SoundEffect::HighScore => play_high_score(ctx, vol),
            }
        }

        /// Start the background drone (restarts from the beginning)
        pub fn start_music(&mut self) {
            self.stop_music();
            if !self.enabled {
                return;
            }
            let Some(ctx) = self.ctx.as_ref() else { return };
            let Some((low, gain)) = create_osc(ctx, 110.0, OscillatorType::Triangle) else {
                return;
            };
            let Some(high) = ctx.create_oscillator().ok() else {
                return;
            };
            high.set_type(OscillatorType::Sine);
            high.frequency().set_value(165.0);
            if high.connect_with_audio_node(&gain).is_err() {
                return;
            }
            gain.gain().set_value(MUSIC_VOLUME * 0.3);
            low.start().ok();
            high.start().ok();
            self.music = Some((low, high, gain));
        }

        pub fn stop_music(&mut self) {
            if let Some((low, high, _gain)) = self.music.take() {
                low.stop().ok();
                high.stop().ok();
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Jump - quick upward chirp
    fn play_jump(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(700.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Collision - crunchy downward buzz
    fn play_collision(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Score - short bright ping
    fn play_score(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 880.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }

    fn play_dialogue(ctx: &AudioContext, vol: f32) {
        // Soft attack on a square voice
        for glide in DIALOGUE {
            play_glide(ctx, glide, OscillatorType::Square, vol * 0.35, 0.03);
        }
    }

    fn play_high_score(ctx: &AudioContext, vol: f32) {
        for glide in FANFARE {
            play_glide(ctx, glide, OscillatorType::Triangle, vol * 0.5, 0.01);
        }
    }

    fn play_glide(
        ctx: &AudioContext,
        (offset, from_hz, to_hz, length): Glide,
        osc_type: OscillatorType,
        peak: f32,
        attack: f64,
    ) {
        let Some((osc, gain)) = create_osc(ctx, from_hz, osc_type) else {
            return;
        };
        let t = ctx.current_time() + offset;

        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().linear_ramp_to_value_at_time(peak, t + attack).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + length)
            .ok();
        osc.frequency().set_value_at_time(from_hz, t).ok();
        if to_hz != from_hz {
            osc.frequency()
                .linear_ramp_to_value_at_time(to_hz, t + length)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + length + 0.05).ok();
    }
}
