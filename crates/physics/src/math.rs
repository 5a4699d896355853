//! 2D axis-aligned geometry shared by the solvers.
//!
//! The policy for degenerate vectors lives here too: normalizing a
//! zero-length vector yields the zero vector (`glam`'s `normalize_or_zero`,
//! used uniformly across the crate), and [`safe_sign`] maps zero to zero so
//! direction-dependent rules produce a neutral contribution instead of NaN.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as center plus half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Center position in world space.
    pub center: Vec2,
    /// Half-size in each axis.
    pub half_extents: Vec2,
}

impl Aabb {
    /// Create a rectangle from its center and full size.
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Create a rectangle from its center and half-extents.
    pub fn from_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Full width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    /// Full height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Lower-left corner.
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Upper-right corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Whether two rectangles overlap.
    ///
    /// Edges count: a rectangle resting exactly on top of another is still in
    /// contact, which keeps grounded flags alive between frames.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        gap.x <= reach.x && gap.y <= reach.y
    }

    /// Whether `other` lies entirely inside this rectangle.
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        let gap = (self.center - other.center).abs();
        let slack = self.half_extents - other.half_extents;
        gap.x <= slack.x && gap.y <= slack.y
    }

    /// Whether a point lies inside this rectangle (edges inclusive).
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        let gap = (point - self.center).abs();
        gap.x <= self.half_extents.x && gap.y <= self.half_extents.y
    }
}

/// Sign of `x` with a neutral zero.
///
/// Unlike `f32::signum`, zero input maps to zero so callers multiplying by
/// the result get a zero-effect fallback rather than an arbitrary direction.
#[inline]
pub fn safe_sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
