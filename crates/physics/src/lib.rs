//! Chronocide Physics Core
//!
//! A constraint-based 2D physics engine for a time-manipulation platformer.
//! Bodies are axis-aligned, non-rotating point-mass rectangles; contacts are
//! resolved by sequential impulses with accumulated-impulse clamping and
//! Baumgarte stabilization.
//!
//! # Architecture
//!
//! The engine is split into small leaf components orchestrated by a world:
//!
//! - **Clock**: elapsed time at a mutable, signed tick speed. Every
//!   independently-timed subsystem owns its own clock, which is how the game
//!   layer runs the environment backward while the player stands still.
//! - **Body**: position, velocity, per-step accumulated acceleration, size,
//!   mass, and a static flag.
//! - **Force**: gravity, drag, and spring effects over a dynamic set of
//!   bodies, applied once per fixed step.
//! - **Constraint**: inequality constraints (body vs. static bounds) solved
//!   by iterative, warm-started impulse accumulation.
//! - **PhysicsWorld**: the fixed-step integration loop plus render-time
//!   interpolation between the last two fixed states.
//!
//! # Design Principles
//!
//! 1. **Determinism**: a pure function of inputs and tick order; no global
//!    clocks or singletons.
//! 2. **Rewindability**: every integration multiplies by the owning clock's
//!    scaled dt, so a negative tick speed retraces motion.
//! 3. **Simplicity**: exhaustive pairwise checks over small body counts; no
//!    broad phase.

pub mod body;
pub mod clock;
pub mod constraint;
pub mod error;
pub mod force;
pub mod math;
pub mod world;

// Re-export commonly used types
pub use body::{Body, BodyId, StepState};
pub use clock::Clock;
pub use constraint::{Constraint, ConstraintId, ConstraintKind};
pub use error::{PhysicsError, Result};
pub use force::{Force, ForceId, ForceKind};
pub use math::{safe_sign, Aabb};
pub use world::{PhysicsWorld, SolverConfig};
