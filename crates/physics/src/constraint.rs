//! Iterative impulse constraints.
//!
//! Constraints are resolved with the sequential-impulse scheme: each fixed
//! step runs several passes over every constraint, each pass computing a
//! candidate impulse from the current (tentative) velocities, accumulating
//! it with clamping, and applying only the increment. The accumulated value
//! lives on the constraint across frames, so a contact that persists keeps
//! its warm-start seed instead of re-converging from zero every step.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyId};
use crate::error::{PhysicsError, Result};
use crate::math::Aabb;
use crate::world::SolverConfig;

/// Stable identifier for a constraint registered with a
/// [`PhysicsWorld`](crate::world::PhysicsWorld).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ConstraintId(pub u32);

/// The closed set of constraint relationships.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Keeps a dynamic body inside a static rectangle.
    ///
    /// This is the reference inequality constraint: it can only push the
    /// body back toward the interior, never pull it outward.
    StaticBounds { body: BodyId, bounds: Aabb },
}

impl ConstraintKind {
    /// Whether two kinds describe the same logical constraint (same variant
    /// binding the same body). Used to reuse accumulated impulse when a
    /// persistent constraint is re-registered.
    pub(crate) fn same_contact(&self, other: &ConstraintKind) -> bool {
        match (self, other) {
            (
                ConstraintKind::StaticBounds { body: a, .. },
                ConstraintKind::StaticBounds { body: b, .. },
            ) => a == b,
        }
    }
}

/// A contact normal and penetration depth selected by the directional
/// four-way branch.
#[derive(Debug, Clone, Copy)]
struct Contact {
    normal: Vec2,
    depth: f32,
}

/// A constraint plus its accumulated impulse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    kind: ConstraintKind,
    /// Accumulated normal impulse (momentum). Clamped non-negative and kept
    /// across frames for warm starting.
    impulse: f32,
}

impl Constraint {
    /// Create a constraint, validating its geometry up front.
    pub fn new(kind: ConstraintKind) -> Result<Self> {
        match &kind {
            ConstraintKind::StaticBounds { bounds, .. } => {
                if bounds.half_extents.x <= 0.0 || bounds.half_extents.y <= 0.0 {
                    return Err(PhysicsError::InvalidBounds(
                        bounds.width(),
                        bounds.height(),
                    ));
                }
            }
        }
        Ok(Self { kind, impulse: 0.0 })
    }

    #[inline]
    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// Accumulated impulse. Non-negative by construction.
    #[inline]
    pub fn impulse(&self) -> f32 {
        self.impulse
    }

    /// Replace the constraint parameters while keeping the accumulated
    /// impulse (the warm start survives geometry updates).
    pub(crate) fn set_kind(&mut self, kind: ConstraintKind) {
        self.kind = kind;
    }

    /// Run one impulse iteration.
    ///
    /// Computes the candidate impulse from the body's current velocity plus
    /// a Baumgarte bias on penetration beyond the slop, accumulates it with
    /// a non-negative clamp, and applies only the increment. A separating or
    /// non-penetrating contact therefore contributes nothing, and the
    /// accumulated value can never pull the body outward.
    pub fn iterate(
        &mut self,
        bodies: &mut BTreeMap<BodyId, Body>,
        dt: f32,
        config: &SolverConfig,
    ) -> Result<()> {
        match self.kind {
            ConstraintKind::StaticBounds { body: id, bounds } => {
                let Some(body) = bodies.get_mut(&id) else {
                    return Ok(());
                };
                if body.is_static() {
                    return Ok(());
                }

                let Some(contact) =
                    containment_contact(body.position, body.half_extents(), &bounds)?
                else {
                    return Ok(());
                };

                let normal_speed = -body.velocity.dot(contact.normal);
                let bias =
                    (config.bias_factor / dt) * (contact.depth - config.slop).max(0.0);
                let delta = (normal_speed + bias) * body.mass();

                let previous = self.impulse;
                self.impulse = (self.impulse + delta).max(0.0);
                let applied = self.impulse - previous;

                let mass = body.mass();
                body.apply_impulse((applied / mass) * contact.normal);
            }
        }
        Ok(())
    }
}

/// Select the contact face for a body overflowing a containing rectangle.
///
/// Normalized center offsets pick the axis with the larger relative
/// penetration; the returned normal points from that face back into the
/// bounds interior. Returns `None` when the body pokes out of neither axis.
/// Exactly one branch fires for any finite interpenetrating state; reaching
/// the final arm means the geometry is non-finite, which is a solver fault,
/// not a recoverable condition.
fn containment_contact(position: Vec2, half_extents: Vec2, bounds: &Aabb) -> Result<Option<Contact>> {
    let offset = position - bounds.center;
    let diff = Vec2::new(
        2.0 * offset.x / bounds.width(),
        2.0 * offset.y / bounds.height(),
    );

    let depth_x = offset.x.abs() + half_extents.x - bounds.half_extents.x;
    let depth_y = offset.y.abs() + half_extents.y - bounds.half_extents.y;
    if depth_x <= 0.0 && depth_y <= 0.0 {
        return Ok(None);
    }

    let contact = if diff.y >= diff.x.abs() {
        // Poking through the top: push back down into the bounds.
        Contact {
            normal: Vec2::NEG_Y,
            depth: depth_y,
        }
    } else if -diff.y >= diff.x.abs() {
        Contact {
            normal: Vec2::Y,
            depth: depth_y,
        }
    } else if diff.x > diff.y.abs() {
        Contact {
            normal: Vec2::NEG_X,
            depth: depth_x,
        }
    } else if -diff.x > diff.y.abs() {
        Contact {
            normal: Vec2::X,
            depth: depth_x,
        }
    } else {
        return Err(PhysicsError::DegenerateContact(position.x, position.y));
    };

    Ok(Some(contact))
}
