//! Level definitions: terrain, platforms, and the player spawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::platform::{Platform, Surface};

/// A game level: static terrain, clock-driven platforms, and a spawn point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Static terrain rectangles.
    pub terrain: Vec<Surface>,

    /// Moving platforms, driven by the manipulation clock.
    pub platforms: Vec<Platform>,

    /// Player spawn position (center).
    pub spawn: Vec2,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            terrain: Vec::new(),
            platforms: Vec::new(),
            spawn: Vec2::ZERO,
        }
    }

    /// A simple test course for development: a floor, two side walls, a
    /// ledge, and one shuttling platform.
    pub fn test_course() -> Self {
        let mut level = Self::new("test_course", "Test Course");

        // Floor
        level
            .terrain
            .push(Surface::fixed(Vec2::new(640.0, -16.0), Vec2::new(1280.0, 32.0)));

        // Side walls
        level
            .terrain
            .push(Surface::fixed(Vec2::new(-16.0, 360.0), Vec2::new(32.0, 720.0)));
        level
            .terrain
            .push(Surface::fixed(Vec2::new(1296.0, 360.0), Vec2::new(32.0, 720.0)));

        // A ledge to coyote-jump from
        level
            .terrain
            .push(Surface::fixed(Vec2::new(300.0, 150.0), Vec2::new(200.0, 20.0)));

        // Shuttle platform crossing the gap
        level.platforms.push(Platform::new(
            Vec2::new(500.0, 250.0),
            Vec2::new(900.0, 250.0),
            Vec2::new(128.0, 16.0),
            6.0,
        ));

        level.spawn = Vec2::new(640.0, 16.0);
        level
    }

    /// All collidable surfaces this frame: static terrain plus every
    /// platform at its current position.
    pub fn surfaces(&self) -> Vec<Surface> {
        let mut surfaces = self.terrain.clone();
        surfaces.extend(self.platforms.iter().map(|p| *p.surface()));
        surfaces
    }
}
