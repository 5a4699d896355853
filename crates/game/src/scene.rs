//! The playable scene: dual clocks, terrain, and the player.
//!
//! Two clocks tick every frame. The *manipulation clock* drives the
//! environment (moving platforms); the *player clock* drives the player's
//! integrator and all coyote-time bookkeeping. Holding rewind sets the
//! manipulation clock to −1 and the player clock to 0: platforms retrace
//! their paths while the player hangs frozen mid-air. Releasing rewind
//! restores both to +1.
//!
//! Terrain resolution runs every frame no matter what the player clock says,
//! because a platform on the manipulation clock can still drive into a
//! time-frozen player and must push them out rather than pass through.

use glam::Vec2;

use chronocide_physics::Clock;

use crate::config::PlayerConfig;
use crate::controller::PlayerController;
use crate::error::GameError;
use crate::input::{Action, ActionState, FrameInput};
use crate::level::Level;
use crate::player::PlayerState;

/// The main playable scene.
#[derive(Debug)]
pub struct GameScene {
    /// Clock driving the environment (platforms).
    manipulation_clock: Clock,

    /// Clock driving the player.
    player_clock: Clock,

    level: Level,
    player: PlayerState,
    controller: PlayerController,
    rewinding: bool,
}

impl GameScene {
    /// Create a scene from a level with the given player configuration.
    pub fn new(level: Level, config: PlayerConfig) -> Self {
        let player = PlayerState::new(level.spawn, config.size);
        Self {
            manipulation_clock: Clock::new(),
            player_clock: Clock::new(),
            level,
            player,
            controller: PlayerController::new(config),
            rewinding: false,
        }
    }

    /// Create a scene on the test course with default configuration.
    pub fn test() -> Self {
        Self::new(Level::test_course(), PlayerConfig::default())
    }

    /// Advance the scene by one frame of real time.
    pub fn update(&mut self, real_delta: f32, input: &FrameInput) -> Result<(), GameError> {
        for event in &input.events {
            match (event.action, event.state) {
                (Action::Jump, ActionState::Pressed) => {
                    self.controller
                        .press_jump(&mut self.player, self.player_clock.elapsed());
                }
                (Action::Jump, ActionState::Released) => {
                    self.controller.release_jump(&mut self.player);
                }
                (Action::Rewind, ActionState::Pressed) => self.set_rewinding(true),
                (Action::Rewind, ActionState::Released) => self.set_rewinding(false),
                (Action::Reset, ActionState::Pressed) => self.reset(),
                (Action::Reset, ActionState::Released) => {}
            }
        }

        self.manipulation_clock.tick(real_delta);
        self.player_clock.tick(real_delta);

        // Platforms follow the manipulation clock. Velocity is measured
        // against real frame time, so a rewinding platform reports the
        // negation of its forward velocity at the mirrored point.
        let environment_time = self.manipulation_clock.elapsed();
        for platform in &mut self.level.platforms {
            platform.update(environment_time, real_delta);
        }

        let surfaces = self.level.surfaces();
        self.controller.step(
            &mut self.player,
            input.horizontal,
            &surfaces,
            self.player_clock.dt(),
            self.player_clock.elapsed(),
        )
    }

    /// Toggle the rewind state, retuning both clocks.
    pub fn set_rewinding(&mut self, active: bool) {
        if self.rewinding == active {
            return;
        }
        self.rewinding = active;
        if active {
            log::debug!("rewind engaged: environment -1x, player frozen");
            self.manipulation_clock.set_tick_speed(-1.0);
            self.player_clock.set_tick_speed(0.0);
        } else {
            log::debug!("rewind released: both clocks 1x");
            self.manipulation_clock.set_tick_speed(1.0);
            self.player_clock.set_tick_speed(1.0);
        }
    }

    /// Restart the level: clocks return to zero at normal speed, the player
    /// respawns, and platforms snap to their initial positions.
    pub fn reset(&mut self) {
        self.manipulation_clock.reset();
        self.player_clock.reset();
        self.rewinding = false;
        self.player = PlayerState::new(self.level.spawn, self.controller.config.size);
        for platform in &mut self.level.platforms {
            platform.reset(0.0);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    #[inline]
    pub fn is_rewinding(&self) -> bool {
        self.rewinding
    }

    /// Whether the player is standing on terrain.
    #[inline]
    pub fn grounded(&self) -> bool {
        self.player.on_ground
    }

    /// Velocity of the surface the player is riding (zero when airborne).
    /// Camera-follow code syncs to this.
    #[inline]
    pub fn platform_velocity(&self) -> Vec2 {
        self.player.platform_velocity
    }

    #[inline]
    pub fn manipulation_clock(&self) -> &Clock {
        &self.manipulation_clock
    }

    #[inline]
    pub fn player_clock(&self) -> &Clock {
        &self.player_clock
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    const DT: f32 = 1.0 / 60.0;

    fn run(scene: &mut GameScene, frames: u32, input: &FrameInput) {
        for _ in 0..frames {
            scene.update(DT, input).unwrap();
        }
    }

    /// A minimal scene: a floor under the spawn and one shuttle platform
    /// well away from the player.
    fn simple_scene() -> GameScene {
        let mut level = Level::new("scene_test", "Scene Test");
        level
            .terrain
            .push(crate::platform::Surface::fixed(
                Vec2::new(0.0, -16.0),
                Vec2::new(2000.0, 32.0),
            ));
        level.platforms.push(Platform::new(
            Vec2::new(500.0, 300.0),
            Vec2::new(900.0, 300.0),
            Vec2::new(128.0, 16.0),
            6.0,
        ));
        level.spawn = Vec2::new(0.0, 16.0);
        GameScene::new(level, PlayerConfig::default())
    }

    #[test]
    fn test_player_settles_on_spawn_floor() {
        let mut scene = simple_scene();
        run(&mut scene, 30, &FrameInput::new());

        assert!(scene.grounded());
        assert!((scene.player().position.y - 16.0).abs() < 1.0);
    }

    #[test]
    fn test_horizontal_input_moves_player() {
        let mut scene = simple_scene();
        run(&mut scene, 10, &FrameInput::new());
        let start_x = scene.player().position.x;

        run(&mut scene, 60, &FrameInput::with_horizontal(1.0));

        assert!(
            scene.player().position.x > start_x + 50.0,
            "player should move right, got {}",
            scene.player().position.x
        );
    }

    #[test]
    fn test_jump_through_scene_events() {
        let mut scene = simple_scene();
        run(&mut scene, 30, &FrameInput::new());
        assert!(scene.grounded());

        scene
            .update(DT, &FrameInput::new().pressed(Action::Jump))
            .unwrap();

        assert!(scene.player().velocity.y > 0.0, "jump should launch player");
    }

    #[test]
    fn test_rewind_freezes_player_and_reverses_platform() {
        let mut scene = simple_scene();

        // Let the player settle and the platform get moving.
        run(&mut scene, 60, &FrameInput::new());
        let platform_before = scene.level().platforms[0].surface().bounds.center;
        let forward_velocity = scene.level().platforms[0].surface().velocity;

        scene
            .update(DT, &FrameInput::new().pressed(Action::Rewind))
            .unwrap();
        assert!(scene.is_rewinding());

        let player_before = scene.player().position;
        run(&mut scene, 30, &FrameInput::new());

        // Player frozen in place.
        assert_eq!(scene.player().position, player_before);

        // Platform moved backward along its path, reporting mirrored
        // velocity.
        let platform_after = scene.level().platforms[0].surface().bounds.center;
        let backward_velocity = scene.level().platforms[0].surface().velocity;
        assert!(platform_after.x < platform_before.x);
        assert!(
            (forward_velocity.x + backward_velocity.x).abs() < 1.0,
            "rewind velocity should mirror forward velocity: {} vs {}",
            forward_velocity.x,
            backward_velocity.x
        );

        // Releasing rewind resumes both clocks.
        scene
            .update(DT, &FrameInput::new().released(Action::Rewind))
            .unwrap();
        assert!(!scene.is_rewinding());
        assert_eq!(scene.player_clock().tick_speed(), 1.0);
        assert_eq!(scene.manipulation_clock().tick_speed(), 1.0);
    }

    #[test]
    fn test_frozen_coyote_window() {
        let mut scene = simple_scene();
        run(&mut scene, 30, &FrameInput::new());

        // Freeze the player clock.
        scene
            .update(DT, &FrameInput::new().pressed(Action::Rewind))
            .unwrap();
        let frozen_time = scene.player_clock().elapsed();

        // The player clock does not advance while rewinding, so no window
        // can expire.
        run(&mut scene, 120, &FrameInput::new());
        assert_eq!(scene.player_clock().elapsed(), frozen_time);
    }

    #[test]
    fn test_reset_restores_spawn_and_clocks() {
        let mut scene = simple_scene();
        run(&mut scene, 60, &FrameInput::with_horizontal(1.0));
        assert!(scene.player().position.x > 10.0);

        scene
            .update(DT, &FrameInput::new().pressed(Action::Reset))
            .unwrap();

        // One frame of fall from spawn at most.
        assert!((scene.player().position.x - scene.level().spawn.x).abs() < 1.0);
        assert!(scene.player_clock().elapsed() <= DT as f64 + 1.0e-9);
        assert_eq!(scene.player_clock().tick_speed(), 1.0);
        assert!(!scene.is_rewinding());
    }

    #[test]
    fn test_platform_pushes_frozen_player() {
        // A platform sweeping through the player's position while the player
        // clock is frozen must push the player, not tunnel through.
        let mut level = Level::new("push_test", "Push Test");
        level.platforms.push(Platform::new(
            Vec2::new(-200.0, 0.0),
            Vec2::new(200.0, 0.0),
            Vec2::new(64.0, 64.0),
            2.0,
        ));
        level.spawn = Vec2::new(0.0, 40.0);
        let mut scene = GameScene::new(level, PlayerConfig::default());

        // Engage rewind immediately: the player hangs frozen mid-air at the
        // spawn while the manipulation clock drives the platform backward
        // along its path, which sweeps it across x=0.
        scene
            .update(DT, &FrameInput::new().pressed(Action::Rewind))
            .unwrap();

        let mut pushed = false;
        for _ in 0..240 {
            scene.update(DT, &FrameInput::new()).unwrap();
            if scene.player().position != Vec2::new(0.0, 40.0) {
                pushed = true;
                break;
            }
        }

        assert!(pushed, "sweeping platform should displace the frozen player");
    }
}
