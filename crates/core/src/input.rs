//! Pointer input for steering the local player.
//!
//! Input capture lives outside the core. Collaborators hand over at most one
//! pointer sample per tick, in screen or world coordinates; the last sample
//! keeps steering until a new one arrives.

use glam::Vec2;

/// One pointer (mouse or touch) sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Position relative to the viewport's top-left corner.
    Screen(Vec2),
    /// Position in world coordinates.
    World(Vec2),
}

/// Last known pointer, kept in screen space so it follows the camera when
/// the player moves without new input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    screen: Vec2,
}

impl PointerState {
    pub fn new(initial_screen: Vec2) -> Self {
        Self {
            screen: initial_screen,
        }
    }

    /// Record a new sample. World samples are mapped through the current
    /// camera offset.
    pub fn apply(&mut self, input: PointerInput, camera_offset: Vec2) {
        self.screen = match input {
            PointerInput::Screen(screen) => screen,
            PointerInput::World(world) => world - camera_offset,
        };
    }

    /// Pointer in world coordinates for the given camera offset.
    pub fn world(&self, camera_offset: Vec2) -> Vec2 {
        self.screen + camera_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_sample_follows_camera() {
        let mut pointer = PointerState::new(Vec2::new(400.0, 300.0));
        assert_eq!(pointer.world(Vec2::new(600.0, 700.0)), Vec2::new(1000.0, 1000.0));

        pointer.apply(PointerInput::Screen(Vec2::new(450.0, 300.0)), Vec2::ZERO);
        assert_eq!(pointer.world(Vec2::new(10.0, 10.0)), Vec2::new(460.0, 310.0));
    }

    #[test]
    fn world_sample_round_trips_through_camera() {
        let mut pointer = PointerState::new(Vec2::ZERO);
        let camera = Vec2::new(123.0, -45.0);
        pointer.apply(PointerInput::World(Vec2::new(800.0, 900.0)), camera);
        assert_eq!(pointer.world(camera), Vec2::new(800.0, 900.0));
    }
}
