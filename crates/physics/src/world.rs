//! The physics world orchestrator.
//!
//! [`PhysicsWorld`] owns the body roster, registered forces, and registered
//! constraints, and drives them through a fixed-step loop. The step order is
//! load-bearing: forces run before velocity integration, constraints run on
//! the tentative post-force velocities, and positions integrate last.
//! Reordering any of these changes the physics.
//!
//! Rendering never reads body state directly. [`PhysicsWorld::update`]
//! interpolates between the snapshot taken at the start of the latest fixed
//! step and the live state, using an externally supplied fraction of a fixed
//! step, so display stays smooth at any frame rate. The trade-off is that
//! interpolated state lags the true state by up to one fixed step.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyId, StepState};
use crate::clock::Clock;
use crate::constraint::{Constraint, ConstraintId};
use crate::error::Result;
use crate::force::{Force, ForceId};

/// Tunable solver parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Constraint resolution passes per fixed step. One pass is not enough
    /// for stacked contacts to agree; several passes approach a consistent
    /// solution.
    pub iterations: u32,

    /// Fraction of residual penetration corrected per step (Baumgarte).
    /// Full correction in one step injects energy; partial correction bleeds
    /// the error out over a few frames.
    pub bias_factor: f32,

    /// Penetration depth tolerated without corrective bias, in world units.
    pub slop: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: 5,
            bias_factor: 0.2,
            slop: 2.0,
        }
    }
}

/// Bodies, forces, and constraints under one fixed-step integrator.
#[derive(Debug)]
pub struct PhysicsWorld {
    clock: Clock,
    config: SolverConfig,

    bodies: BTreeMap<BodyId, Body>,
    next_body_id: u32,

    forces: BTreeMap<ForceId, Force>,
    next_force_id: u32,

    constraints: BTreeMap<ConstraintId, Constraint>,
    next_constraint_id: u32,

    /// Per-body state at the start of the latest fixed step.
    last_states: BTreeMap<BodyId, StepState>,
    /// Per-body interpolated state from the latest render update.
    current_states: BTreeMap<BodyId, StepState>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a world with default solver parameters.
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create a world with explicit solver parameters.
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            clock: Clock::new(),
            config,
            bodies: BTreeMap::new(),
            next_body_id: 0,
            forces: BTreeMap::new(),
            next_force_id: 0,
            constraints: BTreeMap::new(),
            next_constraint_id: 0,
            last_states: BTreeMap::new(),
            current_states: BTreeMap::new(),
        }
    }

    /// The world's own clock. Scaling or freezing it affects every body in
    /// this world and nothing else.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Register a body and return its stable id.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_body_id);
        self.next_body_id += 1;
        self.bodies.insert(id, body);
        id
    }

    /// Remove a body. Removing an unknown id is a no-op. Forces and
    /// constraints still referencing the id skip it from then on.
    pub fn remove_body(&mut self, id: BodyId) {
        self.bodies.remove(&id);
        self.last_states.remove(&id);
        self.current_states.remove(&id);
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Mutable body access, e.g. for per-frame input-driven velocity edits.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().map(|(id, body)| (*id, body))
    }

    /// Register a force and return its id.
    pub fn add_force(&mut self, force: Force) -> ForceId {
        let id = ForceId(self.next_force_id);
        self.next_force_id += 1;
        self.forces.insert(id, force);
        id
    }

    /// Remove a force. Removing an unknown id is a no-op.
    pub fn remove_force(&mut self, id: ForceId) {
        self.forces.remove(&id);
    }

    pub fn force(&self, id: ForceId) -> Option<&Force> {
        self.forces.get(&id)
    }

    /// Mutable force access, e.g. to move a spring anchor or edit the body
    /// set between steps.
    pub fn force_mut(&mut self, id: ForceId) -> Option<&mut Force> {
        self.forces.get_mut(&id)
    }

    /// Register a constraint.
    ///
    /// If a constraint for the same logical contact (same kind, same body)
    /// already exists, its parameters are updated in place and its
    /// accumulated impulse is kept, so a persistent contact warm-starts
    /// across re-registration instead of resetting to zero.
    pub fn add_constraint(&mut self, constraint: Constraint) -> ConstraintId {
        for (id, existing) in &mut self.constraints {
            if existing.kind().same_contact(constraint.kind()) {
                log::debug!(
                    "constraint {:?} re-registered; keeping warm-start impulse {}",
                    id,
                    existing.impulse()
                );
                existing.set_kind(*constraint.kind());
                return *id;
            }
        }
        let id = ConstraintId(self.next_constraint_id);
        self.next_constraint_id += 1;
        self.constraints.insert(id, constraint);
        id
    }

    /// Remove a constraint. Removing an unknown id is a no-op.
    pub fn remove_constraint(&mut self, id: ConstraintId) {
        self.constraints.remove(&id);
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(&id)
    }

    // ========================================================================
    // Stepping
    // ========================================================================

    /// Advance the simulation by one fixed step.
    ///
    /// The caller supplies the fixed delta; the world's clock scales it, so
    /// a frozen or rewinding world sees a zero or negative dt. With dt zero
    /// the step records snapshots and stops: every dependent integrator is a
    /// no-op for this clock only.
    pub fn fixed_update(&mut self, fixed_delta: f32) -> Result<()> {
        let dt = self.clock.tick(fixed_delta);

        // Snapshot previous state and reset the per-step accumulators.
        for (id, body) in &mut self.bodies {
            self.last_states.insert(*id, StepState::of(body));
            body.acceleration = Vec2::ZERO;
        }

        if dt == 0.0 {
            return Ok(());
        }

        // Euler integration: forces accumulate acceleration, then tentative
        // velocities form.
        for force in self.forces.values_mut() {
            force.process(&mut self.bodies);
        }
        for body in self.bodies.values_mut() {
            let delta_v = body.acceleration * dt;
            body.apply_impulse(delta_v);
        }

        // Impulse iterations over every constraint, on the tentative
        // velocities.
        for _ in 0..self.config.iterations {
            for constraint in self.constraints.values_mut() {
                constraint.iterate(&mut self.bodies, dt, &self.config)?;
            }
        }

        // Final velocities move positions.
        for body in self.bodies.values_mut() {
            if !body.is_static() {
                let velocity = body.velocity;
                body.position += velocity * dt;
            }
        }

        Ok(())
    }

    /// Refresh interpolated render states.
    ///
    /// `fraction` is the share of a fixed step elapsed since the last
    /// [`fixed_update`](Self::fixed_update), in `[0, 1]`: 0 reproduces the
    /// last snapshot exactly, 1 the current state exactly.
    pub fn update(&mut self, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0);
        for (id, body) in &self.bodies {
            let current = StepState::of(body);
            let state = match self.last_states.get(id) {
                Some(last) => last.lerp(&current, fraction),
                // Body added since the last fixed step: nothing to blend yet.
                None => current,
            };
            self.current_states.insert(*id, state);
        }
    }

    /// Interpolated state for a body, as of the latest
    /// [`update`](Self::update) call.
    pub fn state(&self, id: BodyId) -> Option<StepState> {
        self.current_states.get(&id).copied()
    }

    /// Snapshot of a body at the start of the latest fixed step.
    pub fn last_state(&self, id: BodyId) -> Option<StepState> {
        self.last_states.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ConstraintKind;
    use crate::force::ForceKind;
    use crate::math::Aabb;

    const DT: f32 = 1.0 / 60.0;

    fn world_with_gravity(strength: f32) -> (PhysicsWorld, ForceId) {
        let mut world = PhysicsWorld::new();
        let gravity = world.add_force(Force::new(ForceKind::Gravity {
            direction: Vec2::NEG_Y,
            strength,
        }));
        (world, gravity)
    }

    #[test]
    fn test_free_fall_matches_discrete_kinematics() {
        let (mut world, gravity) = world_with_gravity(1000.0);
        let id = world.add_body(Body::new(Vec2::ZERO, Vec2::new(8.0, 8.0), 1.0).unwrap());
        world.force_mut(gravity).unwrap().add_body(id);

        let steps = 30;
        let mut expected_y = 0.0_f32;
        let mut expected_vy = 0.0_f32;
        for _ in 0..steps {
            world.fixed_update(DT).unwrap();
            expected_vy -= 1000.0 * DT;
            expected_y += expected_vy * DT;
        }

        let body = world.body(id).unwrap();
        assert!((body.velocity.y - expected_vy).abs() < 1.0e-3);
        assert!((body.position.y - expected_y).abs() < 1.0e-3);
    }

    #[test]
    fn test_step_order_forces_then_constraints_then_positions() {
        // A body resting just inside the floor of a container, pulled down by
        // gravity: the constraint must see the post-force velocity and cancel
        // it before the position integrates, so the body does not sink.
        let (mut world, gravity) = world_with_gravity(1000.0);
        let floor_y = -100.0 + 8.0 - world.config().slop;
        let id = world.add_body(
            Body::new(Vec2::new(0.0, floor_y), Vec2::new(16.0, 16.0), 1.0).unwrap(),
        );
        world.force_mut(gravity).unwrap().add_body(id);
        world.add_constraint(
            Constraint::new(ConstraintKind::StaticBounds {
                body: id,
                bounds: Aabb::new(Vec2::ZERO, Vec2::new(200.0, 200.0)),
            })
            .unwrap(),
        );

        for _ in 0..120 {
            world.fixed_update(DT).unwrap();
        }

        let body = world.body(id).unwrap();
        assert!(
            (body.position.y - floor_y).abs() < 1.0,
            "body should rest at the floor, got y={}",
            body.position.y
        );
    }

    #[test]
    fn test_frozen_clock_freezes_integrators() {
        let (mut world, gravity) = world_with_gravity(1000.0);
        let id = world.add_body(
            Body::new(Vec2::new(3.0, 4.0), Vec2::new(8.0, 8.0), 1.0)
                .unwrap()
                .with_velocity(Vec2::new(10.0, 0.0)),
        );
        world.force_mut(gravity).unwrap().add_body(id);

        world.clock_mut().set_tick_speed(0.0);
        for _ in 0..60 {
            world.fixed_update(DT).unwrap();
        }

        let body = world.body(id).unwrap();
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
        assert_eq!(body.velocity, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_interpolation_endpoints_and_linearity() {
        let mut world = PhysicsWorld::new();
        let id = world.add_body(
            Body::new(Vec2::ZERO, Vec2::new(8.0, 8.0), 1.0)
                .unwrap()
                .with_velocity(Vec2::new(60.0, 0.0)),
        );

        world.fixed_update(1.0).unwrap();
        let last = world.last_state(id).unwrap();
        let live = StepState::of(world.body(id).unwrap());
        assert_eq!(last.position.x, 0.0);
        assert_eq!(live.position.x, 60.0);

        world.update(0.0);
        assert_eq!(world.state(id).unwrap(), last);

        world.update(1.0);
        assert_eq!(world.state(id).unwrap(), live);

        world.update(0.25);
        let quarter = world.state(id).unwrap();
        assert!((quarter.position.x - 15.0).abs() < 1.0e-4);

        world.update(0.75);
        let three_quarters = world.state(id).unwrap();
        assert!((three_quarters.position.x - 45.0).abs() < 1.0e-4);
    }

    #[test]
    fn test_remove_body_is_idempotent_and_purges_state() {
        let mut world = PhysicsWorld::new();
        let id = world.add_body(Body::new(Vec2::ZERO, Vec2::new(8.0, 8.0), 1.0).unwrap());
        world.fixed_update(DT).unwrap();
        world.update(0.5);
        assert!(world.state(id).is_some());

        world.remove_body(id);
        world.remove_body(id);

        assert!(world.body(id).is_none());
        assert!(world.state(id).is_none());
        assert!(world.last_state(id).is_none());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_duplicate_constraint_reuses_warm_start() {
        let mut world = PhysicsWorld::new();
        let id = world.add_body(
            Body::new(Vec2::new(0.0, -95.0), Vec2::new(16.0, 16.0), 1.0)
                .unwrap()
                .with_velocity(Vec2::new(0.0, -10.0)),
        );
        let bounds = Aabb::new(Vec2::ZERO, Vec2::new(200.0, 200.0));
        let constraint_id = world.add_constraint(
            Constraint::new(ConstraintKind::StaticBounds { body: id, bounds }).unwrap(),
        );

        world.fixed_update(DT).unwrap();
        let warm = world.constraint(constraint_id).unwrap().impulse();
        assert!(warm > 0.0);

        // Re-registering the same logical contact keeps the id and the
        // accumulated impulse.
        let again = world.add_constraint(
            Constraint::new(ConstraintKind::StaticBounds { body: id, bounds }).unwrap(),
        );
        assert_eq!(again, constraint_id);
        assert_eq!(world.constraint(constraint_id).unwrap().impulse(), warm);
    }

    #[test]
    fn test_ids_stay_stable_across_removal() {
        let mut world = PhysicsWorld::new();
        let first = world.add_body(Body::new(Vec2::ZERO, Vec2::new(8.0, 8.0), 1.0).unwrap());
        world.remove_body(first);
        let second = world.add_body(Body::new(Vec2::ZERO, Vec2::new(8.0, 8.0), 1.0).unwrap());
        assert_ne!(first, second);
    }
}
