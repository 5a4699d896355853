//! Chronocide Game Logic
//!
//! The gameplay layer of a time-manipulation platformer. Time is the core
//! mechanic: the environment and the player run on *separate clocks*, so
//! rewinding reverses moving platforms while the player stands frozen,
//! waiting for the world to line up.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         GameScene                            │
//! │  ┌────────────┐   ┌─────────────────────┐   ┌─────────────┐  │
//! │  │ FrameInput │──►│ manipulation clock ──┼──►│ platforms   │  │
//! │  │ (axis +    │   │ player clock ────────┼──►│ player      │  │
//! │  │  events)   │   └─────────────────────┘   │ controller  │  │
//! │  └────────────┘                             └─────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The player controller is a per-frame kinematic layer: one-shot impulse
//! resolution against terrain rectangles, tuned for platforming feel. The
//! smooth iterative solver lives in `chronocide-physics` and powers the
//! [`sandbox`] instead; the two resolution policies are intentionally
//! separate.

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod level;
pub mod platform;
pub mod player;
pub mod sandbox;
pub mod scene;

// Re-export main types
pub use config::PlayerConfig;
pub use controller::PlayerController;
pub use error::GameError;
pub use input::{Action, ActionEvent, ActionState, FrameInput};
pub use level::Level;
pub use platform::{Platform, Surface};
pub use player::PlayerState;
pub use sandbox::{Sandbox, SandboxConfig};
pub use scene::GameScene;

// Re-export physics types for convenience
pub use chronocide_physics::{Body, BodyId, Clock, PhysicsWorld, StepState};
