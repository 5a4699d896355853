//! Scaled simulation clocks.
//!
//! A [`Clock`] tracks elapsed time at a mutable, signed tick speed. The key
//! property is that every consumer sees the *scaled* delta, never the raw
//! frame delta: a speed of 0 freezes every integrator driven by this clock,
//! and a speed of −1 makes them run backward, undoing prior motion.
//!
//! There is no global clock. Each independently-timed subsystem (the physics
//! world, the environment's manipulation clock, the player clock) owns its
//! own instance, so different parts of the game can run at different rates
//! in the same frame.

use serde::{Deserialize, Serialize};

/// Elapsed time under a configurable tick speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Accumulated scaled time in seconds.
    elapsed: f64,
    /// Signed multiplier applied to every incoming real delta.
    tick_speed: f64,
    /// Scaled delta of the most recent tick.
    dt: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a clock running at normal speed.
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            tick_speed: 1.0,
            dt: 0.0,
        }
    }

    /// Create a clock with a specific starting speed.
    pub fn with_speed(tick_speed: f64) -> Self {
        Self {
            elapsed: 0.0,
            tick_speed,
            dt: 0.0,
        }
    }

    /// Advance by a real frame delta, scaled by the current tick speed.
    ///
    /// Returns the scaled delta, which is also available from [`Clock::dt`]
    /// until the next tick. The scaled delta is negative while rewinding.
    pub fn tick(&mut self, real_delta: f32) -> f32 {
        let scaled = real_delta as f64 * self.tick_speed;
        self.elapsed += scaled;
        self.dt = scaled as f32;
        self.dt
    }

    /// Change the tick speed. Takes effect on the next tick; the speed value
    /// itself is never interpolated.
    pub fn set_tick_speed(&mut self, speed: f64) {
        self.tick_speed = speed;
    }

    /// Current tick speed multiplier.
    #[inline]
    pub fn tick_speed(&self) -> f64 {
        self.tick_speed
    }

    /// Scaled delta of the most recent tick.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Total scaled time accumulated by this clock.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Scaled time elapsed since a timestamp taken from this clock.
    #[inline]
    pub fn time_since(&self, timestamp: f64) -> f64 {
        self.elapsed - timestamp
    }

    /// Restore the clock for a level restart: time and delta return to zero
    /// and the speed returns to normal.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.tick_speed = 1.0;
        self.dt = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_scales_by_speed() {
        let mut clock = Clock::with_speed(2.0);
        let dt = clock.tick(0.25);
        assert_eq!(dt, 0.5);
        assert_eq!(clock.elapsed(), 0.5);
        assert_eq!(clock.dt(), 0.5);
    }

    #[test]
    fn test_zero_speed_freezes_time() {
        let mut clock = Clock::new();
        clock.tick(1.0);
        clock.set_tick_speed(0.0);

        for _ in 0..100 {
            clock.tick(0.016);
        }

        assert_eq!(clock.elapsed(), 1.0);
        assert_eq!(clock.dt(), 0.0);
    }

    #[test]
    fn test_rewind_symmetry() {
        let mut clock = Clock::new();

        // Tick forward by the same deltas we will later rewind through.
        let deltas = [0.016_f32, 0.017, 0.015, 0.016];
        for d in deltas {
            clock.tick(d);
        }
        let peak = clock.elapsed();
        assert!(peak > 0.0);

        clock.set_tick_speed(-1.0);
        for d in deltas {
            clock.tick(d);
        }

        assert!(
            clock.elapsed().abs() < 1.0e-9,
            "rewinding the same deltas should return to zero, got {}",
            clock.elapsed()
        );
    }

    #[test]
    fn test_speed_change_applies_next_tick() {
        let mut clock = Clock::new();
        clock.tick(1.0);
        assert_eq!(clock.dt(), 1.0);

        // Changing the speed does not retroactively rescale the last delta.
        clock.set_tick_speed(-1.0);
        assert_eq!(clock.dt(), 1.0);

        clock.tick(1.0);
        assert_eq!(clock.dt(), -1.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_time_since() {
        let mut clock = Clock::new();
        clock.tick(2.0);
        let stamp = clock.elapsed();
        clock.tick(0.5);
        assert!((clock.time_since(stamp) - 0.5).abs() < 1.0e-9);
    }

    #[test]
    fn test_reset() {
        let mut clock = Clock::with_speed(-1.0);
        clock.tick(3.0);
        clock.reset();

        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.dt(), 0.0);
        assert_eq!(clock.tick_speed(), 1.0);
    }
}
