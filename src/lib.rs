//! Orb Pop - A timed click-to-score arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (orb motion, scoring, round lifecycle)
//! - `surface`: Display surface events and inputs exchanged with the host
//! - `persistence`: Best-score storage backends
//! - `platform`: Browser/native platform helpers
//! - `settings`: Persisted player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod best_score;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod surface;

pub use best_score::BestScore;
pub use settings::Settings;
pub use sim::{RoundConfig, Session};

/// Game configuration constants
pub mod consts {
    /// Length of one round in seconds
    pub const ROUND_SECONDS: u32 = 20;
    /// Orbs alive on the field during a round
    pub const ORB_COUNT: usize = 5;
    /// Points for a hit with no combo
    pub const BASE_POINTS: u64 = 10;
    /// Max gap between hits that keeps a combo going (ms)
    pub const COMBO_WINDOW_MS: f64 = 800.0;
    /// Combo count at which the multiplier stops growing
    pub const COMBO_CAP: u32 = 5;

    /// Orb speed range (pixels/s)
    pub const ORB_MIN_SPEED: f32 = 60.0;
    pub const ORB_MAX_SPEED: f32 = 180.0;
    /// Orb radius used for hit-testing and rendering
    pub const ORB_RADIUS: f32 = 24.0;
    /// Inset from each arena edge that orb centers stay behind
    pub const ARENA_MARGIN: f32 = 28.0;

    /// Longest physics step per frame (s), bounds motion during frame hitches
    pub const MAX_FRAME_DT: f32 = 0.032;
    /// Countdown interval (ms)
    pub const TICK_INTERVAL_MS: f64 = 1000.0;
    /// Delay between a hit and the orb being replaced (ms)
    pub const POP_DELAY_MS: f64 = 180.0;
    /// Lifetime of a score callout (ms)
    pub const CALLOUT_MS: f64 = 650.0;

    /// Storage key for the best score
    pub const BEST_SCORE_KEY: &str = "orb_pop_best";
}
