//! Player kinematic state and coyote-time bookkeeping.

use chronocide_physics::Aabb;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tracks the most recent jump request against the coyote window.
///
/// A request is recorded at press time (on the player clock) and *consumed*
/// when a jump actually fires, so one press can never produce two impulses
/// (e.g. a press inside the leave-ground window followed by a quick landing
/// inside the press window).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct JumpRequest {
    requested_at: Option<f64>,
}

impl JumpRequest {
    /// Record a request at player-clock time `time`.
    pub fn record(&mut self, time: f64) {
        self.requested_at = Some(time);
    }

    /// Whether an unconsumed request exists within `window` seconds of `now`.
    pub fn pending_within(&self, now: f64, window: f64) -> bool {
        self.requested_at.is_some_and(|t| now - t < window)
    }

    /// Consume the request so it cannot fire again.
    pub fn consume(&mut self) {
        self.requested_at = None;
    }
}

/// Complete kinematic state for the player.
///
/// All timestamps are player-clock times, so freezing the player clock
/// during a rewind also freezes coyote-time eligibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Center position in world space.
    pub position: Vec2,

    /// Velocity in world units per second.
    pub velocity: Vec2,

    /// Half-size of the collision box.
    pub half_extents: Vec2,

    /// Whether the player is standing on terrain.
    pub on_ground: bool,

    /// Velocity of the surface being ridden (zero when airborne). Friction
    /// is computed relative to this, and the camera can sync to it.
    pub platform_velocity: Vec2,

    /// Whether the jump button is currently held (selects rise gravity).
    pub jump_held: bool,

    /// Outstanding jump request, if any.
    pub jump: JumpRequest,

    /// Player-clock time when ground contact was last lost.
    pub last_ground_time: f64,
}

impl PlayerState {
    /// Create a player at rest at the given position.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extents: size * 0.5,
            on_ground: false,
            platform_velocity: Vec2::ZERO,
            jump_held: false,
            jump: JumpRequest::default(),
            last_ground_time: f64::NEG_INFINITY,
        }
    }

    /// World-space bounding rectangle.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_half_extents(self.position, self.half_extents)
    }

    /// Horizontal speed relative to the ridden surface.
    pub fn relative_velocity(&self) -> Vec2 {
        self.velocity - self.platform_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_request_window() {
        let mut request = JumpRequest::default();
        assert!(!request.pending_within(0.0, 1.0));

        request.record(10.0);
        assert!(request.pending_within(10.05, 0.1));
        assert!(!request.pending_within(10.2, 0.1));
    }

    #[test]
    fn test_jump_request_consumed_once() {
        let mut request = JumpRequest::default();
        request.record(5.0);
        assert!(request.pending_within(5.01, 0.1));

        request.consume();
        assert!(!request.pending_within(5.01, 0.1));
    }

    #[test]
    fn test_new_player_has_expired_ground_time() {
        let player = PlayerState::new(Vec2::ZERO, Vec2::new(32.0, 32.0));
        // A freshly spawned airborne player must not be coyote-eligible.
        assert!(0.0 - player.last_ground_time > 1.0);
    }
}
