//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::surface::{DisplaySurface, SurfaceEvent};

/// Seconds left at which the countdown starts beeping
const BEEP_FROM_SECONDS: u32 = 3;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Orb popped; pitch climbs with the combo
    Pop { combo: u32 },
    /// Round started
    RoundStart,
    /// Final seconds of the countdown
    CountdownBeep,
    /// Round finished
    RoundOver,
    /// Round finished with a new best
    NewBest,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Combo reported just before the pop it belongs to
    last_combo: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            last_combo: 0,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Pop { combo } => self.play_pop(ctx, vol, combo),
            SoundEffect::RoundStart => self.play_round_start(ctx, vol),
            SoundEffect::CountdownBeep => self.play_beep(ctx, vol),
            SoundEffect::RoundOver => self.play_round_over(ctx, vol),
            SoundEffect::NewBest => self.play_new_best(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Pop - short bubbly blip, a semitone higher per combo step
    fn play_pop(&self, ctx: &AudioContext, vol: f32, combo: u32) {
        let freq = 520.0 * 2f32.powf(combo.min(12) as f32 / 12.0);
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(freq, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(freq * 1.8, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Round start - rising two-note chirp
    fn play_round_start(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [440.0, 660.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Countdown beep - short square tick
    fn play_beep(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Round over - falling tone
    fn play_round_over(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(100.0, t + 0.6)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.7).ok();
    }

    /// New best - ascending arpeggio
    fn play_new_best(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}

impl DisplaySurface for AudioManager {
    fn apply(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::Combo(combo) => self.last_combo = *combo,
            SurfaceEvent::OrbPopped { .. } => self.play(SoundEffect::Pop {
                combo: self.last_combo,
            }),
            SurfaceEvent::StartEnabled(false) => self.play(SoundEffect::RoundStart),
            SurfaceEvent::TimeLeft(t) if (1..=BEEP_FROM_SECONDS).contains(t) => {
                self.play(SoundEffect::CountdownBeep)
            }
            SurfaceEvent::RoundOver { new_best, .. } => self.play(if *new_best {
                SoundEffect::NewBest
            } else {
                SoundEffect::RoundOver
            }),
            _ => {}
        }
    }
}
