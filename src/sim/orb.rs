//! Orb entity: a drifting clickable target

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Bounce};

/// Stable orb identifier (unique for the lifetime of a session)
pub type OrbId = u32;

/// An orb entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub id: OrbId,
    /// Center in surface-local pixels
    pub pos: Vec2,
    /// Velocity in pixels/s
    pub vel: Vec2,
    /// False once hit; the orb lingers for the pop delay before removal
    pub alive: bool,
}

impl Orb {
    /// Spawn an orb at a random position with a random heading
    ///
    /// Speed is uniform in `[min_speed, max_speed]`. With `still` set the
    /// velocity is zero (reduced motion).
    pub fn spawn<R: Rng + ?Sized>(
        id: OrbId,
        rng: &mut R,
        arena: &Arena,
        min_speed: f32,
        max_speed: f32,
        still: bool,
    ) -> Self {
        let pos = arena.random_point(rng);
        let vel = if still {
            Vec2::ZERO
        } else {
            let heading = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = if max_speed > min_speed {
                rng.random_range(min_speed..=max_speed)
            } else {
                min_speed
            };
            Vec2::from_angle(heading) * speed
        };

        Self {
            id,
            pos,
            vel,
            alive: true,
        }
    }

    /// Advance by `dt` seconds and bounce off the arena edges
    pub fn integrate(&mut self, dt: f32, arena: &Arena) -> Bounce {
        self.pos += self.vel * dt;
        arena.reflect(&mut self.pos, &mut self.vel)
    }

    /// Pull the orb back inside after the arena shrank
    ///
    /// Returns true if the position changed.
    pub fn confine(&mut self, arena: &Arena) -> bool {
        let clamped = arena.clamp(self.pos);
        if clamped != self.pos {
            self.pos = clamped;
            true
        } else {
            false
        }
    }

    /// Check if a point lies on this orb
    pub fn contains(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance_squared(point) <= radius * radius
    }
}
