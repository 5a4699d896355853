//! Error types for the gameplay layer.

use chronocide_physics::PhysicsError;
use thiserror::Error;

/// Errors surfaced by the gameplay layer.
///
/// `DegenerateContact` mirrors the physics crate's solver fault for the
/// per-frame terrain resolution: the four-way normal selection can only fail
/// on non-finite geometry, and picking a fallback normal could launch the
/// player, so the frame fails loudly instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GameError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error("terrain contact normal selection matched no face at ({x}, {y}); geometry is non-finite")]
    DegenerateContact { x: f32, y: f32 },
}
