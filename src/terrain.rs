//! Terrain queries consumed by the tick integrator.
//!
//! The map itself belongs to the host. The integrator only needs to keep
//! agents inside the playable area and to place them on the ground after each
//! step.

use glam::Vec2;

/// Map bounds and height sampling on the ground plane.
#[cfg_attr(test, mockall::automock)]
pub trait Terrain {
    /// Returns the closest point to `point` inside the map bounds.
    fn clamp_to_bounds(&self, point: Vec2) -> Vec2;
    /// Ground height at `point`.
    fn height_at(&self, point: Vec2) -> f32;
}

/// Rectangular map with a constant ground height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatTerrain {
    /// Lowest `(x, z)` corner of the playable area.
    pub min: Vec2,
    /// Highest `(x, z)` corner of the playable area.
    pub max: Vec2,
    /// Ground height everywhere on the map.
    pub height: f32,
}

impl FlatTerrain {
    /// Creates a flat map spanning `min..=max` at `height`.
    ///
    /// The corners are reordered so `min <= max` on both axes.
    #[must_use]
    pub fn new(min: Vec2, max: Vec2, height: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            height,
        }
    }

    /// A square map centred on the origin with the given half extent.
    #[must_use]
    pub fn square(half_extent: f32) -> Self {
        Self::new(Vec2::splat(-half_extent), Vec2::splat(half_extent), 0.0)
    }
}

impl Terrain for FlatTerrain {
    fn clamp_to_bounds(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    fn height_at(&self, _point: Vec2) -> f32 {
        self.height
    }
}
