//! Forces applied during Euler integration.
//!
//! A force is a named effect over a dynamic set of bodies, run once per
//! fixed step before velocities are integrated. The set is mutable at any
//! time: membership operations are idempotent, and [`Force::process`] walks
//! a snapshot of the list so the set (or the world's roster) may change
//! mid-pass without corrupting iteration.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyId};

/// Stable identifier for a force registered with a
/// [`PhysicsWorld`](crate::world::PhysicsWorld).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ForceId(pub u32);

/// The closed set of force effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForceKind {
    /// Constant acceleration `direction * strength`.
    ///
    /// Gravity acts the same on every mass, so this is an acceleration, not
    /// a force.
    Gravity { direction: Vec2, strength: f32 },

    /// Quadratic drag opposing the current velocity.
    ///
    /// Applied as a force of magnitude `0.5 * |v|^2 * coefficient`, so
    /// heavier bodies shed speed more slowly. A body at rest contributes
    /// nothing.
    Drag { coefficient: f32 },

    /// Spring toward a movable anchor point.
    ///
    /// Accelerates along the normalized displacement with magnitude
    /// `tension * (rest_length - current_length)`. The anchor may be moved
    /// every frame (e.g. following the pointer), which is what makes
    /// drag-to-launch interactions work. A body sitting exactly on the
    /// anchor contributes nothing.
    Spring {
        anchor: Vec2,
        tension: f32,
        rest_length: f32,
    },
}

/// A force effect plus the set of bodies it acts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Force {
    kind: ForceKind,
    bodies: Vec<BodyId>,
}

impl Force {
    pub fn new(kind: ForceKind) -> Self {
        Self {
            kind,
            bodies: Vec::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &ForceKind {
        &self.kind
    }

    #[inline]
    pub fn kind_mut(&mut self) -> &mut ForceKind {
        &mut self.kind
    }

    /// Move a spring's anchor. No-op for other force kinds.
    pub fn set_spring_anchor(&mut self, position: Vec2) {
        if let ForceKind::Spring { anchor, .. } = &mut self.kind {
            *anchor = position;
        }
    }

    /// Add a body to the set. Adding a body twice is a no-op.
    pub fn add_body(&mut self, id: BodyId) {
        if self.bodies.contains(&id) {
            return;
        }
        self.bodies.push(id);
    }

    /// Remove a body from the set. Removing an absent body is a no-op.
    pub fn remove_body(&mut self, id: BodyId) {
        self.bodies.retain(|b| *b != id);
    }

    /// Whether a body is in the set.
    pub fn affects(&self, id: BodyId) -> bool {
        self.bodies.contains(&id)
    }

    /// Number of bodies in the set.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Apply this force's rule to every body in the set once.
    ///
    /// Iterates a snapshot of the member list. Ids whose body is no longer
    /// registered with the world are dropped from the set rather than
    /// applied.
    pub fn process(&mut self, bodies: &mut BTreeMap<BodyId, Body>) {
        let snapshot: Vec<BodyId> = self.bodies.clone();
        for id in snapshot {
            match bodies.get_mut(&id) {
                Some(body) => self.apply_to(body),
                None => self.remove_body(id),
            }
        }
    }

    fn apply_to(&self, body: &mut Body) {
        match &self.kind {
            ForceKind::Gravity {
                direction,
                strength,
            } => {
                body.apply_acceleration(*direction * *strength);
            }
            ForceKind::Drag { coefficient } => {
                let direction = body.velocity.normalize_or_zero();
                let magnitude = 0.5 * body.velocity.length_squared() * coefficient;
                body.apply_force(-direction * magnitude);
            }
            ForceKind::Spring {
                anchor,
                tension,
                rest_length,
            } => {
                let displacement = body.position - *anchor;
                let length = displacement.length();
                let direction = displacement.normalize_or_zero();
                body.apply_acceleration(direction * (tension * (rest_length - length)));
            }
        }
    }
}
