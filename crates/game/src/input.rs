//! Frame input model.
//!
//! The input-device layer is an external collaborator; this module defines
//! the contract it must satisfy. Continuous state arrives as an axis value.
//! Discrete actions arrive as *edge events*: one event per transition, not
//! one per frame the key is held.

use serde::{Deserialize, Serialize};

/// Discrete player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Jump (space).
    Jump,
    /// Hold to rewind the environment (R).
    Rewind,
    /// Restart the level (backspace).
    Reset,
}

/// Whether an action edge was a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionState {
    Pressed,
    Released,
}

/// A single action transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub action: Action,
    pub state: ActionState,
}

/// Everything the game consumes from input for one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Horizontal movement axis in `[-1, 1]`.
    pub horizontal: f32,

    /// Action transitions that occurred this frame, in order.
    pub events: Vec<ActionEvent>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame with only an axis value. Out-of-range values are clamped.
    pub fn with_horizontal(horizontal: f32) -> Self {
        Self {
            horizontal: horizontal.clamp(-1.0, 1.0),
            events: Vec::new(),
        }
    }

    /// Builder-style press event.
    pub fn pressed(mut self, action: Action) -> Self {
        self.events.push(ActionEvent {
            action,
            state: ActionState::Pressed,
        });
        self
    }

    /// Builder-style release event.
    pub fn released(mut self, action: Action) -> Self {
        self.events.push(ActionEvent {
            action,
            state: ActionState::Released,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_clamped() {
        assert_eq!(FrameInput::with_horizontal(2.5).horizontal, 1.0);
        assert_eq!(FrameInput::with_horizontal(-7.0).horizontal, -1.0);
        assert_eq!(FrameInput::with_horizontal(0.25).horizontal, 0.25);
    }

    #[test]
    fn test_event_order_preserved() {
        let input = FrameInput::new()
            .pressed(Action::Jump)
            .released(Action::Jump)
            .pressed(Action::Rewind);

        assert_eq!(input.events.len(), 3);
        assert_eq!(input.events[0].action, Action::Jump);
        assert_eq!(input.events[0].state, ActionState::Pressed);
        assert_eq!(input.events[1].state, ActionState::Released);
        assert_eq!(input.events[2].action, Action::Rewind);
    }
}
