//! Arena geometry for drifting orbs
//!
//! The arena is the display surface's client rectangle in surface-local pixels,
//! origin at the top-left. Orb centers live inside the padded rectangle
//! `[margin, size - margin]` on both axes.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which velocity components flipped during a reflection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

impl Bounce {
    /// True if any edge was hit
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Padded rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Inset from every edge
    pub margin: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            margin: margin.max(0.0),
        }
    }

    /// Lowest allowed orb center
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::splat(self.margin)
    }

    /// Highest allowed orb center
    ///
    /// Collapses onto `min` when the surface is narrower than two margins, so
    /// clamping stays well defined on tiny layouts.
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(
            (self.width - self.margin).max(self.margin),
            (self.height - self.margin).max(self.margin),
        )
    }

    /// Center of the arena
    pub fn center(&self) -> Vec2 {
        (self.min() + self.max()) * 0.5
    }

    /// Check if a point lies inside the padded bounds (inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// Clamp a point into the padded bounds
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Update the surface size after a layout change
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Uniformly random point inside the padded bounds
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let (min, max) = (self.min(), self.max());
        Vec2::new(
            min.x + rng.random::<f32>() * (max.x - min.x),
            min.y + rng.random::<f32>() * (max.y - min.y),
        )
    }

    /// Reflect a moving point off the padded edges
    ///
    /// A coordinate past an edge is clamped onto it and the matching velocity
    /// component is pointed back inside. The other component is untouched.
    pub fn reflect(&self, pos: &mut Vec2, vel: &mut Vec2) -> Bounce {
        let (min, max) = (self.min(), self.max());
        let mut bounce = Bounce::default();

        if pos.x < min.x {
            pos.x = min.x;
            vel.x = vel.x.abs();
            bounce.x = true;
        } else if pos.x > max.x {
            pos.x = max.x;
            vel.x = -vel.x.abs();
            bounce.x = true;
        }

        if pos.y < min.y {
            pos.y = min.y;
            vel.y = vel.y.abs();
            bounce.y = true;
        } else if pos.y > max.y {
            pos.y = max.y;
            vel.y = -vel.y.abs();
            bounce.y = true;
        }

        bounce
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_bounds_inset_by_margin() {
        let arena = Arena::new(800.0, 600.0, 28.0);
        assert_eq!(arena.min(), Vec2::new(28.0, 28.0));
        assert_eq!(arena.max(), Vec2::new(772.0, 572.0));
        assert!(arena.contains(Vec2::new(28.0, 572.0)));
        assert!(!arena.contains(Vec2::new(27.9, 300.0)));
    }

    #[test]
    fn test_tiny_surface_collapses_bounds() {
        let arena = Arena::new(40.0, 10.0, 28.0);
        assert_eq!(arena.max(), arena.min());
        assert_eq!(arena.clamp(Vec2::new(500.0, -3.0)), Vec2::splat(28.0));
    }

    #[test]
    fn test_reflect_right_edge() {
        let arena = Arena::new(200.0, 200.0, 10.0);
        let mut pos = Vec2::new(195.0, 100.0);
        let mut vel = Vec2::new(50.0, -20.0);

        let bounce = arena.reflect(&mut pos, &mut vel);
        assert_eq!(bounce, Bounce { x: true, y: false });
        assert_eq!(pos, Vec2::new(190.0, 100.0));
        assert_eq!(vel, Vec2::new(-50.0, -20.0));
    }

    #[test]
    fn test_reflect_corner_flips_both() {
        let arena = Arena::new(200.0, 200.0, 10.0);
        let mut pos = Vec2::new(4.0, 3.0);
        let mut vel = Vec2::new(-30.0, -40.0);

        let bounce = arena.reflect(&mut pos, &mut vel);
        assert!(bounce.x && bounce.y);
        assert_eq!(pos, Vec2::splat(10.0));
        assert_eq!(vel, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_reflect_inside_is_noop() {
        let arena = Arena::new(200.0, 200.0, 10.0);
        let mut pos = Vec2::new(100.0, 100.0);
        let mut vel = Vec2::new(-30.0, 40.0);

        assert!(!arena.reflect(&mut pos, &mut vel).any());
        assert_eq!(vel, Vec2::new(-30.0, 40.0));
    }

    #[test]
    fn test_random_point_inside() {
        let arena = Arena::new(320.0, 240.0, 28.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            assert!(arena.contains(arena.random_point(&mut rng)));
        }
    }

    proptest! {
        #[test]
        fn prop_single_axis_crossing_flips_one_component(
            x in -50.0f32..50.0,
            vx in 1.0f32..300.0,
            vy in -300.0f32..300.0,
        ) {
            // Start left of the margin, moving further left
            let arena = Arena::new(400.0, 400.0, 20.0);
            let mut pos = Vec2::new(x.min(19.0), 200.0);
            let mut vel = Vec2::new(-vx, vy);

            let bounce = arena.reflect(&mut pos, &mut vel);
            prop_assert!(bounce.x);
            prop_assert!(!bounce.y);
            prop_assert_eq!(vel.x, vx);
            prop_assert_eq!(vel.y, vy);
            prop_assert!(arena.contains(pos));
        }

        #[test]
        fn prop_reflect_always_lands_inside(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            w in 0.0f32..900.0,
            h in 0.0f32..900.0,
        ) {
            let arena = Arena::new(w, h, 24.0);
            let mut pos = Vec2::new(x, y);
            let mut vel = Vec2::new(10.0, -10.0);
            arena.reflect(&mut pos, &mut vel);
            prop_assert!(arena.contains(pos));
        }
    }
}
