//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is passed in by the caller, never read
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod config;
pub mod orb;
pub mod scheduler;
pub mod scoring;
pub mod session;

pub use arena::{Arena, Bounce};
pub use config::{ConfigError, RoundConfig};
pub use orb::{Orb, OrbId};
pub use scheduler::{CalloutId, Deferred, DueTask, Scheduler};
pub use scoring::{award_points, callout_text, multiplier, next_combo};
pub use session::{GamePhase, HitOutcome, RoundState, Session};
