//! Display surface interface
//!
//! The session never touches the page directly. It queues [`SurfaceEvent`]s
//! that a [`DisplaySurface`] turns into visuals, and the host feeds player
//! actions back as [`SurfaceInput`]s.

#[cfg(target_arch = "wasm32")]
pub mod dom;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{CalloutId, OrbId};

/// Something the display should show or change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// Create a visual target
    OrbSpawned { id: OrbId, pos: Vec2 },
    /// Move a visual target
    OrbMoved { id: OrbId, pos: Vec2 },
    /// Apply the "hit" visual state
    OrbPopped { id: OrbId },
    /// Remove a visual target
    OrbRemoved { id: OrbId },
    /// Show a transient text callout
    CalloutShown {
        id: CalloutId,
        pos: Vec2,
        text: String,
    },
    /// Remove a transient text callout
    CalloutRemoved { id: CalloutId },
    /// Current score
    Score(u64),
    /// Current combo count
    Combo(u32),
    /// Seconds remaining
    TimeLeft(u32),
    /// Best score
    Best(u64),
    /// Enable or disable the start control
    StartEnabled(bool),
    /// Round finished
    RoundOver { score: u64, best: u64, new_best: bool },
}

/// Player and layout input reported by the display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SurfaceInput {
    /// Start gesture (button or keyboard confirm while idle)
    StartRequested,
    /// Explicit stop
    StopRequested,
    /// Pointer click or keyboard confirm on an orb
    Activate(OrbId),
    /// Surface changed size
    Resized { width: f32, height: f32 },
}

/// Renders session output
pub trait DisplaySurface {
    fn apply(&mut self, event: &SurfaceEvent);
}

/// Surface that keeps every event it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Most recent score reported
    pub fn last_score(&self) -> Option<u64> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Score(s) => Some(*s),
            _ => None,
        })
    }

    /// Most recent time remaining reported
    pub fn last_time_left(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::TimeLeft(t) => Some(*t),
            _ => None,
        })
    }

    /// Orbs spawned and not yet removed, in spawn order
    pub fn live_orbs(&self) -> Vec<OrbId> {
        let mut live = Vec::new();
        for event in &self.events {
            match event {
                SurfaceEvent::OrbSpawned { id, .. } => live.push(*id),
                SurfaceEvent::OrbRemoved { id } => live.retain(|o| o != id),
                _ => {}
            }
        }
        live
    }

    /// Callouts shown and not yet removed
    pub fn live_callouts(&self) -> Vec<CalloutId> {
        let mut live = Vec::new();
        for event in &self.events {
            match event {
                SurfaceEvent::CalloutShown { id, .. } => live.push(*id),
                SurfaceEvent::CalloutRemoved { id } => live.retain(|c| c != id),
                _ => {}
            }
        }
        live
    }
}

impl DisplaySurface for RecordingSurface {
    fn apply(&mut self, event: &SurfaceEvent) {
        self.events.push(event.clone());
    }
}

/// Surface that writes events to the log (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSurface;

impl DisplaySurface for LogSurface {
    fn apply(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::OrbMoved { .. } => log::trace!("{:?}", event),
            SurfaceEvent::RoundOver { .. } | SurfaceEvent::Best(_) => {
                log::info!("{:?}", event)
            }
            _ => log::debug!("{:?}", event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_tracks_live_orbs() {
        let mut surface = RecordingSurface::new();
        for event in [
            SurfaceEvent::OrbSpawned { id: 1, pos: Vec2::ZERO },
            SurfaceEvent::OrbSpawned { id: 2, pos: Vec2::ONE },
            SurfaceEvent::Score(10),
            SurfaceEvent::OrbRemoved { id: 1 },
            SurfaceEvent::OrbSpawned { id: 3, pos: Vec2::ONE },
            SurfaceEvent::Score(30),
        ] {
            surface.apply(&event);
        }
        assert_eq!(surface.live_orbs(), vec![2, 3]);
        assert_eq!(surface.last_score(), Some(30));
        assert_eq!(surface.last_time_left(), None);
    }
}
