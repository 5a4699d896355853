//! Per-frame player movement and terrain resolution.
//!
//! This is the gameplay collision layer, distinct from the iterative solver
//! in `chronocide-physics`. It runs once per rendered frame (not per fixed
//! step) and resolves each contact in one shot: an impulse plus full
//! positional correction, with no bias term. Landings are instant, and
//! shallow contacts at normal frame rates never jitter.
//!
//! Every velocity and position change scales by the *player clock's* dt, so
//! a frozen player clock turns the motion half of the step into a no-op.
//! The terrain sweep still runs: platforms on the manipulation clock keep
//! moving and must push a time-frozen player out rather than tunnel through.

use chronocide_physics::safe_sign;
use glam::Vec2;

use crate::config::PlayerConfig;
use crate::error::GameError;
use crate::platform::Surface;
use crate::player::PlayerState;

/// Player movement controller.
///
/// Owns the tuning constants and drives a [`PlayerState`] through gravity,
/// input, drag, friction, integration, and terrain resolution.
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Movement configuration.
    pub config: PlayerConfig,
}

impl PlayerController {
    /// Create a controller with the given configuration.
    pub fn new(config: PlayerConfig) -> Self {
        Self { config }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(PlayerConfig::default())
    }

    // ========================================================================
    // Jump events
    // ========================================================================

    /// Handle a jump press at player-clock time `now`.
    ///
    /// Fires immediately when grounded, or when ground was lost within the
    /// coyote window. Otherwise the request stays pending and may fire on
    /// landing (see [`step`](Self::step)).
    pub fn press_jump(&self, player: &mut PlayerState, now: f64) {
        player.jump_held = true;
        player.jump.record(now);

        if player.on_ground || now - player.last_ground_time <= self.config.coyote_time {
            self.launch(player);
        }
    }

    /// Handle a jump release.
    pub fn release_jump(&self, player: &mut PlayerState) {
        player.jump_held = false;
    }

    fn launch(&self, player: &mut PlayerState) {
        player.velocity.y += self.config.jump_speed;
        player.jump.consume();
    }

    // ========================================================================
    // Frame step
    // ========================================================================

    /// Advance the player by one frame.
    ///
    /// `dt` is the player clock's scaled delta, `now` its elapsed time.
    /// `horizontal` is the input axis in `[-1, 1]`.
    pub fn step(
        &self,
        player: &mut PlayerState,
        horizontal: f32,
        surfaces: &[Surface],
        dt: f32,
        now: f64,
    ) -> Result<(), GameError> {
        let horizontal = horizontal.clamp(-1.0, 1.0);

        self.apply_gravity(player, dt);

        player.velocity.x += horizontal * self.config.move_accel(player.on_ground) * dt;

        self.apply_drag(player, dt);
        if player.on_ground {
            self.apply_friction(player, horizontal, dt);
        }

        player.position += player.velocity * dt;

        let was_on_ground = player.on_ground;
        self.resolve_terrain(player, surfaces)?;

        // Landing inside the coyote window honors a jump pressed mid-air.
        if player.on_ground
            && !was_on_ground
            && player.jump.pending_within(now, self.config.coyote_time)
        {
            log::debug!("coyote jump honored on landing at t={:.3}", now);
            self.launch(player);
        }

        if was_on_ground && !player.on_ground {
            player.last_ground_time = now;
        }

        Ok(())
    }

    fn apply_gravity(&self, player: &mut PlayerState, dt: f32) {
        let gravity = self.config.gravity_for(player.velocity.y, player.jump_held);
        player.velocity.y -= gravity * dt;
    }

    /// Quadratic air drag, always active.
    fn apply_drag(&self, player: &mut PlayerState, dt: f32) {
        let direction = player.velocity.normalize_or_zero();
        let magnitude = 0.5 * player.velocity.length_squared() * self.config.air_drag;
        player.velocity += -direction * magnitude * dt;
    }

    /// Ground friction, relative to the ridden surface.
    ///
    /// Input pushing along the current relative motion counts as "holding"
    /// and gets the light coefficient; anything else gets the heavy one so
    /// the player stops quickly on release.
    fn apply_friction(&self, player: &mut PlayerState, horizontal: f32, dt: f32) {
        let relative = player.relative_velocity();
        let direction = relative.normalize_or_zero();
        let holding = safe_sign(horizontal) * safe_sign(relative.x) > 0.0;
        let coefficient = if holding {
            self.config.friction_hold
        } else {
            self.config.friction_release
        };
        player.velocity += -direction * coefficient * self.config.fall_gravity * dt;
    }

    /// Sweep every terrain rectangle overlapping the player and resolve each
    /// contact in one shot.
    ///
    /// The contact whose surface moves fastest becomes the contact platform:
    /// its velocity is the friction reference for the next frame.
    fn resolve_terrain(
        &self,
        player: &mut PlayerState,
        surfaces: &[Surface],
    ) -> Result<(), GameError> {
        let mut grounded = false;
        let mut platform_velocity = Vec2::ZERO;
        let mut best_speed = -1.0_f32;

        for surface in surfaces {
            if !player.bounds().overlaps(&surface.bounds) {
                continue;
            }

            let (normal, depth) = surface_contact(player.position, player.half_extents, surface)?;

            let relative = player.velocity - surface.velocity;
            let impulse = (-normal.dot(relative)).max(0.0);
            player.velocity += impulse * normal;
            player.position += depth * normal;

            if normal.y > 0.0 {
                grounded = true;
            }

            let speed = surface.velocity.length();
            if speed > best_speed {
                best_speed = speed;
                platform_velocity = surface.velocity;
            }
        }

        player.on_ground = grounded;
        player.platform_velocity = if grounded {
            platform_velocity
        } else {
            Vec2::ZERO
        };

        Ok(())
    }
}

/// Select the contact face for a player overlapping a terrain rectangle.
///
/// The axis with the larger normalized center offset wins; the normal points
/// away from the terrain block, pushing the player out. The final arm is
/// only reachable with non-finite geometry and is a fatal fault.
fn surface_contact(
    position: Vec2,
    half_extents: Vec2,
    surface: &Surface,
) -> Result<(Vec2, f32), GameError> {
    let rect = &surface.bounds;
    let offset = position - rect.center;
    let diff = Vec2::new(
        2.0 * offset.x / rect.width(),
        2.0 * offset.y / rect.height(),
    );

    let reach = rect.half_extents + half_extents;

    if diff.y >= diff.x.abs() {
        // Player above: push up onto the surface.
        Ok((Vec2::Y, reach.y - offset.y))
    } else if -diff.y >= diff.x.abs() {
        Ok((Vec2::NEG_Y, reach.y + offset.y))
    } else if diff.x > diff.y.abs() {
        Ok((Vec2::X, reach.x - offset.x))
    } else if -diff.x > diff.y.abs() {
        Ok((Vec2::NEG_X, reach.x + offset.x))
    } else {
        Err(GameError::DegenerateContact {
            x: position.x,
            y: position.y,
        })
    }
}
