//! Interactive physics sandbox harness.
//!
//! Drives a [`PhysicsWorld`] from variable real frame deltas: an accumulator
//! converts them into fixed steps, and the leftover fraction feeds the
//! world's render-time interpolation. Bodies live inside a static bounds
//! container under gravity and drag; a pointer-anchored spring lets the
//! caller grab a body, drag it around, and release it to launch
//! (slingshot-style).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use chronocide_physics::{
    Aabb, Body, BodyId, Constraint, ConstraintKind, Force, ForceId, ForceKind, PhysicsWorld,
    Result, SolverConfig, StepState,
};

/// Tunables for the sandbox world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Fixed simulation step in seconds.
    pub fixed_delta: f32,

    /// Gravity acceleration (units/second²).
    pub gravity: f32,

    /// Quadratic drag coefficient applied to every body.
    pub drag: f32,

    /// Spring constant of the pointer grab.
    pub spring_tension: f32,

    /// Solver parameters for the underlying world.
    pub solver: SolverConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            fixed_delta: 1.0 / 60.0,
            gravity: 2000.0,
            drag: 0.005,
            spring_tension: 120.0,
            solver: SolverConfig::default(),
        }
    }
}

/// A self-contained physics playground.
#[derive(Debug)]
pub struct Sandbox {
    world: PhysicsWorld,
    config: SandboxConfig,
    bounds: Aabb,

    gravity: ForceId,
    drag: ForceId,
    spring: ForceId,
    grabbed: Option<BodyId>,

    accumulator: f32,
    /// Interpolation may only run once a fixed step has produced snapshots;
    /// blending against pre-simulation state would show stale positions.
    stepped: bool,
}

impl Sandbox {
    /// Create a sandbox whose bodies are contained in `bounds`.
    pub fn new(bounds: Aabb, config: SandboxConfig) -> Self {
        let mut world = PhysicsWorld::with_config(config.solver.clone());

        let gravity = world.add_force(Force::new(ForceKind::Gravity {
            direction: Vec2::NEG_Y,
            strength: config.gravity,
        }));
        let drag = world.add_force(Force::new(ForceKind::Drag {
            coefficient: config.drag,
        }));
        let spring = world.add_force(Force::new(ForceKind::Spring {
            anchor: bounds.center,
            tension: config.spring_tension,
            rest_length: 0.0,
        }));

        Self {
            world,
            config,
            bounds,
            gravity,
            drag,
            spring,
            grabbed: None,
            accumulator: 0.0,
            stepped: false,
        }
    }

    /// Spawn a dynamic box, wire it to gravity and drag, and keep it inside
    /// the container.
    pub fn spawn_box(&mut self, position: Vec2, size: Vec2, mass: f32) -> Result<BodyId> {
        let id = self.world.add_body(Body::new(position, size, mass)?);

        if let Some(force) = self.world.force_mut(self.gravity) {
            force.add_body(id);
        }
        if let Some(force) = self.world.force_mut(self.drag) {
            force.add_body(id);
        }
        let containment = Constraint::new(ConstraintKind::StaticBounds {
            body: id,
            bounds: self.bounds,
        })?;
        self.world.add_constraint(containment);

        Ok(id)
    }

    /// Attach the pointer spring to a body.
    pub fn grab(&mut self, id: BodyId, pointer: Vec2) {
        self.release();
        if self.world.body(id).is_none() {
            return;
        }
        if let Some(spring) = self.world.force_mut(self.spring) {
            spring.set_spring_anchor(pointer);
            spring.add_body(id);
        }
        self.grabbed = Some(id);
        log::debug!("grabbed body {:?} at {:?}", id, pointer);
    }

    /// Move the pointer (and the spring anchor with it).
    pub fn move_pointer(&mut self, pointer: Vec2) {
        if let Some(spring) = self.world.force_mut(self.spring) {
            spring.set_spring_anchor(pointer);
        }
    }

    /// Detach the spring; whatever velocity the body has, it keeps.
    pub fn release(&mut self) {
        if let Some(id) = self.grabbed.take() {
            if let Some(spring) = self.world.force_mut(self.spring) {
                spring.remove_body(id);
            }
        }
    }

    /// Currently grabbed body, if any.
    pub fn grabbed(&self) -> Option<BodyId> {
        self.grabbed
    }

    /// Advance by one frame of real time.
    ///
    /// Runs as many fixed steps as the accumulator covers, then refreshes
    /// interpolated states with the leftover fraction of a step.
    pub fn update(&mut self, real_delta: f32) -> Result<()> {
        self.accumulator += real_delta;
        while self.accumulator >= self.config.fixed_delta {
            self.world.fixed_update(self.config.fixed_delta)?;
            self.accumulator -= self.config.fixed_delta;
            self.stepped = true;
        }
        if self.stepped {
            self.world.update(self.accumulator / self.config.fixed_delta);
        }
        Ok(())
    }

    /// Interpolated render state for a body.
    pub fn state(&self, id: BodyId) -> Option<StepState> {
        self.world.state(id)
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }
}
