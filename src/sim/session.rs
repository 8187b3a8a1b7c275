//! Game session: orb spawning, motion, scoring, countdown and round lifecycle
//!
//! The session is driven entirely by its caller. The host forwards animation
//! frames to [`Session::advance`] and player actions to
//! [`Session::handle_input`], then flushes the queued [`SurfaceEvent`]s into
//! its [`DisplaySurface`]. Nothing here reads a clock or touches the page.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::config::{ConfigError, RoundConfig};
use super::orb::{Orb, OrbId};
use super::scheduler::{CalloutId, Deferred, Scheduler};
use super::scoring::{award_points, callout_text, next_combo};
use crate::best_score::BestScore;
use crate::consts::TICK_INTERVAL_MS;
use crate::persistence::ScoreStore;
use crate::surface::{DisplaySurface, SurfaceEvent, SurfaceInput};

/// Session lifecycle: Idle -> Running -> Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start gesture
    Idle,
    /// Countdown and orbs active
    Running,
}

/// Mutable state of the current (or last) round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u64,
    /// Whole seconds left on the countdown
    pub time_left: u32,
    pub combo: u32,
    /// Timestamp (ms) of the last scoring hit
    pub last_hit_ms: Option<f64>,
    pub running: bool,
}

impl RoundState {
    pub fn new(round_seconds: u32) -> Self {
        Self {
            score: 0,
            time_left: round_seconds,
            combo: 0,
            last_hit_ms: None,
            running: false,
        }
    }
}

/// Result of a scoring hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub orb: OrbId,
    pub combo: u32,
    pub points: u64,
    /// Score after the hit
    pub score: u64,
}

/// One player's game: the current round plus the persistent best
pub struct Session {
    config: RoundConfig,
    arena: Arena,
    rng: Pcg32,
    round: RoundState,
    /// Orbs on the field, popped ones included until their respawn fires
    orbs: Vec<Orb>,
    /// Bumped by every round start; deferred tasks from older rounds are stale
    generation: u64,
    scheduler: Scheduler,
    callouts: Vec<CalloutId>,
    next_id: u32,
    best: BestScore,
    store: Box<dyn ScoreStore>,
    next_tick_ms: Option<f64>,
    last_frame_ms: Option<f64>,
    events: Vec<SurfaceEvent>,
}

impl Session {
    /// Create an idle session on a surface of the given size
    ///
    /// Reads the best score from `store` and queues the initial HUD state.
    pub fn new(
        config: RoundConfig,
        width: f32,
        height: f32,
        seed: u64,
        store: Box<dyn ScoreStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let best = BestScore::load(&*store);
        let arena = Arena::new(width, height, config.margin);
        let round = RoundState::new(config.round_seconds);

        let mut session = Self {
            config,
            arena,
            rng: Pcg32::seed_from_u64(seed),
            round,
            orbs: Vec::new(),
            generation: 0,
            scheduler: Scheduler::new(),
            callouts: Vec::new(),
            next_id: 1,
            best,
            store,
            next_tick_ms: None,
            last_frame_ms: None,
            events: Vec::new(),
        };

        session.events.extend([
            SurfaceEvent::Best(best.value()),
            SurfaceEvent::Score(0),
            SurfaceEvent::TimeLeft(session.config.round_seconds),
            SurfaceEvent::StartEnabled(true),
        ]);

        Ok(session)
    }

    /// Allocate a new entity ID (orbs and callouts share the sequence)
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // === Lifecycle ===

    /// Start a fresh round, discarding anything left from the previous one
    pub fn start_round(&mut self, now_ms: f64) {
        self.clear_field();

        self.generation += 1;
        self.round = RoundState::new(self.config.round_seconds);
        self.round.running = true;

        for _ in 0..self.config.orb_count {
            self.spawn_orb();
        }

        self.next_tick_ms = Some(now_ms + TICK_INTERVAL_MS);
        self.last_frame_ms = None;

        self.events.extend([
            SurfaceEvent::Score(0),
            SurfaceEvent::Combo(0),
            SurfaceEvent::TimeLeft(self.round.time_left),
            SurfaceEvent::StartEnabled(false),
        ]);

        log::info!(
            "Round {} started: {} orbs, {}s",
            self.generation,
            self.orbs.len(),
            self.round.time_left
        );
    }

    /// Finish the running round and settle the best score
    pub fn end_round(&mut self) {
        if !self.round.running {
            return;
        }

        self.round.running = false;
        self.next_tick_ms = None;
        self.last_frame_ms = None;

        self.clear_field();
        self.events.push(SurfaceEvent::StartEnabled(true));

        let score = self.round.score;
        let new_best = self.best.submit(score, &mut *self.store);
        if new_best {
            self.events.push(SurfaceEvent::Best(score));
        }
        self.events.push(SurfaceEvent::RoundOver {
            score,
            best: self.best.value(),
            new_best,
        });

        log::info!(
            "Round {} over: score {}{}",
            self.generation,
            score,
            if new_best { " (new best)" } else { "" }
        );
    }

    /// Remove all orbs and callouts from the display
    fn clear_field(&mut self) {
        for orb in self.orbs.drain(..) {
            self.events.push(SurfaceEvent::OrbRemoved { id: orb.id });
        }
        for id in self.callouts.drain(..) {
            self.events.push(SurfaceEvent::CalloutRemoved { id });
        }
    }

    fn spawn_orb(&mut self) {
        let id = self.next_entity_id();
        let orb = Orb::spawn(
            id,
            &mut self.rng,
            &self.arena,
            self.config.min_speed,
            self.config.max_speed,
            self.config.reduced_motion,
        );
        self.events.push(SurfaceEvent::OrbSpawned { id, pos: orb.pos });
        self.orbs.push(orb);
    }

    // === Per-frame / per-second ===

    /// Move every live orb by `dt` seconds (clamped to the frame step limit)
    pub fn update(&mut self, dt: f32) {
        if !self.round.running {
            return;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        };

        for orb in self.orbs.iter_mut().filter(|o| o.alive) {
            orb.integrate(dt, &self.arena);
            self.events.push(SurfaceEvent::OrbMoved {
                id: orb.id,
                pos: orb.pos,
            });
        }
    }

    /// One second of countdown
    pub fn tick(&mut self) {
        if !self.round.running {
            return;
        }

        self.round.time_left = self.round.time_left.saturating_sub(1);
        self.events.push(SurfaceEvent::TimeLeft(self.round.time_left));

        if self.round.time_left == 0 {
            self.end_round();
        }
    }

    /// Drive the session from an animation frame at `now_ms`
    ///
    /// Runs due deferred tasks, steps the orbs, and fires every countdown
    /// second that has elapsed since the last frame. Returns true while the
    /// host should keep requesting frames.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        self.run_due(now_ms);

        if !self.round.running {
            return false;
        }

        let dt = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.update(dt);

        while let Some(due) = self.next_tick_ms {
            if now_ms < due {
                break;
            }
            self.next_tick_ms = Some(due + TICK_INTERVAL_MS);
            // May end the round, which clears next_tick_ms
            self.tick();
        }

        self.round.running
    }

    fn run_due(&mut self, now_ms: f64) {
        for due in self.scheduler.take_due(now_ms) {
            match due.task {
                Deferred::Respawn { orb } => self.respawn(orb, due.generation),
                Deferred::ClearCallout { callout } => self.clear_callout(callout),
            }
        }
    }

    fn respawn(&mut self, orb: OrbId, generation: u64) {
        if generation != self.generation || !self.round.running {
            log::trace!("Dropping stale respawn of orb {} (round {})", orb, generation);
            return;
        }
        let Some(idx) = self.orbs.iter().position(|o| o.id == orb) else {
            return;
        };
        self.orbs.remove(idx);
        self.events.push(SurfaceEvent::OrbRemoved { id: orb });
        self.spawn_orb();
    }

    fn clear_callout(&mut self, id: CalloutId) {
        if let Some(idx) = self.callouts.iter().position(|&c| c == id) {
            self.callouts.remove(idx);
            self.events.push(SurfaceEvent::CalloutRemoved { id });
        }
    }

    // === Input ===

    /// Score a hit on `id` at `now_ms`
    ///
    /// Returns `None` (and changes nothing) when idle or when the orb is
    /// unknown or already popped.
    pub fn handle_activation(&mut self, id: OrbId, now_ms: f64) -> Option<HitOutcome> {
        if !self.round.running {
            return None;
        }

        let orb = self.orbs.iter_mut().find(|o| o.id == id && o.alive)?;
        orb.alive = false;
        let pos = orb.pos;

        let combo = next_combo(
            self.round.combo,
            self.round.last_hit_ms,
            now_ms,
            self.config.combo_window_ms,
        );
        self.round.combo = combo;
        self.round.last_hit_ms = Some(now_ms);

        let points = award_points(self.config.base_points, combo, self.config.combo_cap);
        self.round.score = self.round.score.saturating_add(points);

        self.events.extend([
            SurfaceEvent::Score(self.round.score),
            SurfaceEvent::Combo(combo),
            SurfaceEvent::OrbPopped { id },
        ]);

        let callout = self.next_entity_id();
        self.callouts.push(callout);
        self.events.push(SurfaceEvent::CalloutShown {
            id: callout,
            pos,
            text: callout_text(points, combo, self.config.combo_cap),
        });
        self.scheduler.schedule(
            now_ms + self.config.callout_ms,
            self.generation,
            Deferred::ClearCallout { callout },
        );
        self.scheduler.schedule(
            now_ms + self.config.pop_delay_ms,
            self.generation,
            Deferred::Respawn { orb: id },
        );

        log::debug!(
            "Hit orb {}: combo {}, +{} -> {}",
            id,
            combo,
            points,
            self.round.score
        );

        Some(HitOutcome {
            orb: id,
            combo,
            points,
            score: self.round.score,
        })
    }

    /// Re-measure the arena and pull stray orbs back inside
    pub fn on_surface_resize(&mut self, width: f32, height: f32) {
        self.arena.resize(width, height);
        for orb in &mut self.orbs {
            if orb.confine(&self.arena) {
                self.events.push(SurfaceEvent::OrbMoved {
                    id: orb.id,
                    pos: orb.pos,
                });
            }
        }
        log::debug!("Arena resized to {}x{}", width, height);
    }

    /// Dispatch a display input
    pub fn handle_input(&mut self, input: SurfaceInput, now_ms: f64) {
        match input {
            SurfaceInput::StartRequested => {
                if self.round.running {
                    log::debug!("Start ignored, round already running");
                } else {
                    self.start_round(now_ms);
                }
            }
            SurfaceInput::StopRequested => self.end_round(),
            SurfaceInput::Activate(id) => {
                self.handle_activation(id, now_ms);
            }
            SurfaceInput::Resized { width, height } => self.on_surface_resize(width, height),
        }
    }

    /// Live orb under `point`, nearest center first
    pub fn orb_at(&self, point: Vec2) -> Option<OrbId> {
        let radius = self.config.orb_radius;
        self.orbs
            .iter()
            .filter(|o| o.alive && o.contains(point, radius))
            .min_by(|a, b| {
                a.pos
                    .distance_squared(point)
                    .total_cmp(&b.pos.distance_squared(point))
            })
            .map(|o| o.id)
    }

    // === Output ===

    /// Hand queued events to a display
    pub fn flush(&mut self, surface: &mut dyn DisplaySurface) {
        for event in self.events.drain(..) {
            surface.apply(&event);
        }
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        if self.round.running {
            GamePhase::Running
        } else {
            GamePhase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.round.running
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn best(&self) -> u64 {
        self.best.value()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Deferred tasks not yet run
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }
}
