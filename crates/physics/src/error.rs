//! Error types for the physics core.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Errors produced by the physics core.
///
/// Construction errors (`InvalidMass`, `InvalidSize`, `InvalidBounds`) are
/// rejected up front so the solver never has to divide by a zero extent.
/// `DegenerateContact` is different: it means the directional normal
/// selection matched none of its four branches, which is only possible with
/// non-finite geometry (NaN positions or corrupted state). Picking a default
/// normal instead would inject energy, so the solver fails loudly and the
/// fault propagates to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    #[error("body mass must be positive, got {0}")]
    InvalidMass(f32),

    #[error("body size must have positive area, got {0}x{1}")]
    InvalidSize(f32, f32),

    #[error("bounds rectangle must have positive area, got {0}x{1}")]
    InvalidBounds(f32, f32),

    #[error("contact normal selection matched no face for body at ({0}, {1}); geometry is non-finite")]
    DegenerateContact(f32, f32),
}
