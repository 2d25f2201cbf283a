use serde::{Deserialize, Serialize};

/// Visible viewport size in world pixels (the canvas resolution).
pub const VIEW_WIDTH: f32 = 800.0;
pub const VIEW_HEIGHT: f32 = 480.0;

/// Horizontal scroll offset, derived from the player position each
/// frame and clamped to the level bounds. Purely a projection of other
/// state — nothing else mutates it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Center the view on the player, clamped to `[0, world - view]`.
    pub fn follow(&mut self, player_center_x: f32, world_width: f32) {
        let max_x = (world_width - VIEW_WIDTH).max(0.0);
        self.x = (player_center_x - VIEW_WIDTH / 2.0).clamp(0.0, max_x);
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_player_center() {
        let mut camera = Camera::default();
        camera.follow(1500.0, 3000.0);
        assert_eq!(camera.x, 1500.0 - VIEW_WIDTH / 2.0);
    }

    #[test]
    fn clamps_at_level_start() {
        let mut camera = Camera::default();
        camera.follow(100.0, 3000.0);
        assert_eq!(camera.x, 0.0);
    }

    #[test]
    fn clamps_at_level_end() {
        let mut camera = Camera::default();
        camera.follow(2950.0, 3000.0);
        assert_eq!(camera.x, 3000.0 - VIEW_WIDTH);
    }

    #[test]
    fn narrow_world_pins_camera_at_zero() {
        let mut camera = Camera::default();
        camera.follow(300.0, 600.0);
        assert_eq!(camera.x, 0.0);
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut camera = Camera { x: 500.0 };
        camera.reset();
        assert_eq!(camera.x, 0.0);
    }
}
