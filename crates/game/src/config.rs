//! Player movement configuration constants.
//!
//! All movement parameters are grouped here for easy tuning. Units are world
//! units (pixels) and seconds. The player is assumed to weigh a fixed amount,
//! so drag and friction are expressed directly as accelerations.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Configuration for player movement physics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    // ========================================================================
    // Player Dimensions
    // ========================================================================
    /// Collision box size (width, height).
    pub size: Vec2,

    // ========================================================================
    // Movement
    // ========================================================================
    /// Horizontal acceleration while grounded (units/second²).
    pub ground_accel: f32,

    /// Horizontal acceleration while airborne (units/second²).
    pub air_accel: f32,

    /// Upward velocity impulse applied on a jump (units/second).
    pub jump_speed: f32,

    // ========================================================================
    // Gravity
    // ========================================================================
    /// Gravity while falling (units/second²).
    pub fall_gravity: f32,

    /// Gravity while rising with the jump button released.
    /// Larger than `hold_gravity` so tapping jump gives a short hop.
    pub release_gravity: f32,

    /// Gravity while rising with the jump button held.
    pub hold_gravity: f32,

    // ========================================================================
    // Drag and Friction
    // ========================================================================
    /// Quadratic air drag coefficient.
    pub air_drag: f32,

    /// Ground friction while input matches the direction of motion.
    /// Small, so running stays fast.
    pub friction_hold: f32,

    /// Ground friction with no input, or input against motion.
    /// Large, so releasing the stick stops the player quickly.
    pub friction_release: f32,

    // ========================================================================
    // Timers
    // ========================================================================
    /// Coyote-time window in seconds (~4 frames at 60 fps). Measured on the
    /// player clock, in both directions: a jump pressed shortly after
    /// walking off a ledge still fires, and a jump pressed shortly before
    /// landing fires on touchdown.
    pub coyote_time: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(32.0, 32.0),

            ground_accel: 2000.0,
            air_accel: 1200.0,
            jump_speed: 1000.0,

            fall_gravity: 2000.0,
            release_gravity: 1250.0,
            hold_gravity: 1000.0,

            air_drag: 0.005,
            friction_hold: 0.04,
            friction_release: 0.9,

            coyote_time: 1.0 / 15.0,
        }
    }
}

impl PlayerConfig {
    /// Gravity magnitude for the current vertical state.
    ///
    /// Rising uses the hold/release pair (holding jump floats longer);
    /// falling always uses the heavier fall gravity for a snappy descent.
    pub fn gravity_for(&self, vertical_velocity: f32, jump_held: bool) -> f32 {
        if vertical_velocity >= 0.0 {
            if jump_held {
                self.hold_gravity
            } else {
                self.release_gravity
            }
        } else {
            self.fall_gravity
        }
    }

    /// Horizontal acceleration for the current ground state.
    pub fn move_accel(&self, on_ground: bool) -> f32 {
        if on_ground {
            self.ground_accel
        } else {
            self.air_accel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_sane() {
        let config = PlayerConfig::default();
        assert!(config.ground_accel > config.air_accel);
        assert!(config.fall_gravity >= config.release_gravity);
        assert!(config.release_gravity >= config.hold_gravity);
        assert!(config.friction_release > config.friction_hold);
        assert!(config.coyote_time > 0.0);
    }

    #[test]
    fn test_gravity_selection() {
        let config = PlayerConfig::default();

        assert_eq!(config.gravity_for(100.0, true), config.hold_gravity);
        assert_eq!(config.gravity_for(100.0, false), config.release_gravity);
        assert_eq!(config.gravity_for(-100.0, true), config.fall_gravity);
        assert_eq!(config.gravity_for(-100.0, false), config.fall_gravity);
        // At the apex the player still counts as rising.
        assert_eq!(config.gravity_for(0.0, true), config.hold_gravity);
    }
}
