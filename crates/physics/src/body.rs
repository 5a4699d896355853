//! Physics bodies and their fixed-step snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};
use crate::math::Aabb;

/// Stable identifier for a body registered with a
/// [`PhysicsWorld`](crate::world::PhysicsWorld).
///
/// Ids are assigned from a monotonic counter at registration and never change
/// with the body's numeric state, so they stay valid as map keys across
/// frames.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BodyId(pub u32);

/// A rotationless point-mass rectangle.
///
/// Bodies carry no angular state: they are axis-aligned boxes whose only
/// dynamics are linear. Acceleration is a per-step accumulator; the world
/// zeroes it at the start of every fixed step and forces add into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Center position in world space.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Acceleration accumulated by forces during the current fixed step.
    pub acceleration: Vec2,
    size: Vec2,
    mass: f32,
    is_static: bool,
}

impl Body {
    /// Create a dynamic body at rest.
    ///
    /// Rejects non-positive mass and zero-area sizes here so no solver math
    /// ever divides by a zero extent.
    pub fn new(position: Vec2, size: Vec2, mass: f32) -> Result<Self> {
        if mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(PhysicsError::InvalidSize(size.x, size.y));
        }
        Ok(Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            size,
            mass,
            is_static: false,
        })
    }

    /// Create a static body. Static bodies ignore all force, acceleration,
    /// and impulse application.
    pub fn fixed(position: Vec2, size: Vec2) -> Result<Self> {
        let mut body = Self::new(position, size, 1.0)?;
        body.is_static = true;
        Ok(body)
    }

    /// Builder-style initial velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        if !self.is_static {
            self.velocity = velocity;
        }
        self
    }

    /// Full size (width, height).
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Half-size in each axis.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// World-space bounding rectangle.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Accumulate a force (mass-dependent) into this step's acceleration.
    /// No-op on static bodies.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static {
            return;
        }
        let acceleration = force / self.mass;
        self.apply_acceleration(acceleration);
    }

    /// Accumulate an acceleration into this step's acceleration.
    /// No-op on static bodies.
    pub fn apply_acceleration(&mut self, acceleration: Vec2) {
        if self.is_static {
            return;
        }
        self.acceleration += acceleration;
    }

    /// Apply an instantaneous velocity change. No-op on static bodies.
    pub fn apply_impulse(&mut self, delta_velocity: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += delta_velocity;
    }
}

/// Snapshot of a body's state at a fixed-step boundary.
///
/// The world records one of these per body at the start of each fixed step
/// (`last`) and interpolates between it and the live state at render time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl StepState {
    /// Capture a snapshot from a body.
    #[inline]
    pub fn of(body: &Body) -> Self {
        Self {
            position: body.position,
            velocity: body.velocity,
        }
    }

    /// Linear interpolation toward `other`. `fraction = 0` returns `self`
    /// exactly, `fraction = 1` returns `other` exactly.
    pub fn lerp(&self, other: &StepState, fraction: f32) -> StepState {
        StepState {
            position: self.position + (other.position - self.position) * fraction,
            velocity: self.velocity + (other.velocity - self.velocity) * fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_construction_rejected() {
        assert_eq!(
            Body::new(Vec2::ZERO, Vec2::new(10.0, 10.0), 0.0).unwrap_err(),
            PhysicsError::InvalidMass(0.0)
        );
        assert_eq!(
            Body::new(Vec2::ZERO, Vec2::new(10.0, 10.0), -2.0).unwrap_err(),
            PhysicsError::InvalidMass(-2.0)
        );
        assert_eq!(
            Body::new(Vec2::ZERO, Vec2::new(0.0, 10.0), 1.0).unwrap_err(),
            PhysicsError::InvalidSize(0.0, 10.0)
        );
    }

    #[test]
    fn test_apply_force_divides_by_mass() {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(2.0, 2.0), 4.0).unwrap();
        body.apply_force(Vec2::new(8.0, 0.0));
        assert_eq!(body.acceleration, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_static_body_ignores_everything() {
        let mut body = Body::fixed(Vec2::ZERO, Vec2::new(2.0, 2.0)).unwrap();

        body.apply_force(Vec2::new(100.0, 0.0));
        body.apply_acceleration(Vec2::new(0.0, -100.0));
        body.apply_impulse(Vec2::new(5.0, 5.0));

        assert_eq!(body.acceleration, Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_bounds() {
        let body = Body::new(Vec2::new(5.0, 5.0), Vec2::new(4.0, 2.0), 1.0).unwrap();
        let bounds = body.bounds();
        assert_eq!(bounds.min(), Vec2::new(3.0, 4.0));
        assert_eq!(bounds.max(), Vec2::new(7.0, 6.0));
    }

    #[test]
    fn test_step_state_lerp_endpoints() {
        let a = StepState {
            position: Vec2::new(0.0, 0.0),
            velocity: Vec2::new(1.0, 0.0),
        };
        let b = StepState {
            position: Vec2::new(10.0, 20.0),
            velocity: Vec2::new(3.0, -4.0),
        };

        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);

        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.position, Vec2::new(5.0, 10.0));
        assert_eq!(mid.velocity, Vec2::new(2.0, -2.0));
    }
}
