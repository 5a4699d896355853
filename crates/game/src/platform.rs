//! Terrain surfaces and clock-driven moving platforms.
//!
//! Platform motion is a pure function of the manipulation clock's elapsed
//! time. That single decision is what makes rewind work: running the clock
//! backward replays the path in reverse exactly, with no accumulated drift,
//! and the measured velocity flips sign on its own.

use chronocide_physics::Aabb;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A solid rectangle the player collides with.
///
/// Static terrain has zero velocity; moving platforms update theirs every
/// frame so landing on one imparts its momentum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Collision rectangle in world space.
    pub bounds: Aabb,
    /// Velocity of the surface (units/second).
    pub velocity: Vec2,
}

impl Surface {
    /// A surface that never moves.
    pub fn fixed(center: Vec2, size: Vec2) -> Self {
        Self {
            bounds: Aabb::new(center, size),
            velocity: Vec2::ZERO,
        }
    }
}

/// A platform ping-ponging between two endpoints.
///
/// The position at clock time `t` is sampled from a triangle wave over the
/// cycle period, so it is well defined for negative time too. Velocity is
/// derived from the positional delta over the *real* frame delta, which is
/// how a rewinding platform reports the mirror image of its forward
/// velocity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    start: Vec2,
    end: Vec2,
    /// Seconds for a full out-and-back cycle.
    period: f32,
    surface: Surface,
}

impl Platform {
    /// Create a platform of the given size traveling `start -> end -> start`
    /// over `period` seconds. `period` must be positive.
    pub fn new(start: Vec2, end: Vec2, size: Vec2, period: f32) -> Self {
        debug_assert!(period > 0.0, "platform period must be positive");
        Self {
            start,
            end,
            period,
            surface: Surface {
                bounds: Aabb::new(start, size),
                velocity: Vec2::ZERO,
            },
        }
    }

    /// The platform's collision surface at its current position.
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Position on the path at a clock time (seconds, may be negative).
    pub fn sample(&self, time: f64) -> Vec2 {
        let cycle = (time / self.period as f64).rem_euclid(1.0) as f32;
        let phase = if cycle < 0.5 {
            cycle * 2.0
        } else {
            2.0 - cycle * 2.0
        };
        self.start.lerp(self.end, phase)
    }

    /// Move to the path position for `time` and measure velocity against the
    /// real frame delta.
    pub fn update(&mut self, time: f64, real_delta: f32) {
        let next = self.sample(time);
        self.surface.velocity = if real_delta > f32::EPSILON {
            (next - self.surface.bounds.center) / real_delta
        } else {
            Vec2::ZERO
        };
        self.surface.bounds.center = next;
    }

    /// Snap to the path position for `time` without producing velocity.
    /// Used on level reset.
    pub fn reset(&mut self, time: f64) {
        self.surface.bounds.center = self.sample(time);
        self.surface.velocity = Vec2::ZERO;
    }
}
