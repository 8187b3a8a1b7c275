//! Round tuning with validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a [`RoundConfig`] cannot run a round
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("round duration must be at least one second")]
    ZeroDuration,
    #[error("at least one orb is required")]
    NoOrbs,
    #[error("invalid orb speed range {min}..={max}")]
    SpeedRange { min: f32, max: f32 },
    #[error("orb radius {radius} must be positive and within margin {margin}")]
    OrbRadius { radius: f32, margin: f32 },
    #[error("frame step clamp must be positive, got {0}")]
    FrameClamp(f32),
    #[error("{name} must be non-negative, got {value}")]
    NegativeDelay { name: &'static str, value: f64 },
}

/// Parameters of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub round_seconds: u32,
    pub orb_count: usize,
    pub base_points: u64,
    pub combo_window_ms: f64,
    pub combo_cap: u32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub orb_radius: f32,
    pub margin: f32,
    pub max_frame_dt: f32,
    pub pop_delay_ms: f64,
    pub callout_ms: f64,
    /// Spawn orbs without velocity
    pub reduced_motion: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            orb_count: ORB_COUNT,
            base_points: BASE_POINTS,
            combo_window_ms: COMBO_WINDOW_MS,
            combo_cap: COMBO_CAP,
            min_speed: ORB_MIN_SPEED,
            max_speed: ORB_MAX_SPEED,
            orb_radius: ORB_RADIUS,
            margin: ARENA_MARGIN,
            max_frame_dt: MAX_FRAME_DT,
            pop_delay_ms: POP_DELAY_MS,
            callout_ms: CALLOUT_MS,
            reduced_motion: false,
        }
    }
}

impl RoundConfig {
    /// Default tuning with reduced motion toggled
    pub fn with_reduced_motion(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            ..Self::default()
        }
    }

    /// Check the config can drive a round
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_seconds == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.orb_count == 0 {
            return Err(ConfigError::NoOrbs);
        }
        if !(self.min_speed >= 0.0 && self.max_speed >= self.min_speed) {
            return Err(ConfigError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if !(self.orb_radius > 0.0 && self.orb_radius <= self.margin) {
            return Err(ConfigError::OrbRadius {
                radius: self.orb_radius,
                margin: self.margin,
            });
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(ConfigError::FrameClamp(self.max_frame_dt));
        }
        for (name, value) in [
            ("combo window", self.combo_window_ms),
            ("pop delay", self.pop_delay_ms),
            ("callout lifetime", self.callout_ms),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeDelay { name, value });
            }
        }
        Ok(())
    }
}
