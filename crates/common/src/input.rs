use std::time::Duration;

use aphrodite_math::Vector3;
use serde::{Deserialize, Serialize};

use crate::CameraState;

/// Movement keys, bound to W/S/A/D on the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [Self::Forward, Self::Backward, Self::Left, Self::Right];

    /// Maps a physical key code name (`"KeyW"`, `"KeyA"`, ...) to a movement key.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Backward),
            "KeyA" => Some(Self::Left),
            "KeyD" => Some(Self::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held-key state that flies a [`CameraState`] along its own axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraController {
    /// World units per second.
    pub speed: f32,
    #[serde(skip)]
    held: [bool; 4],
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl CameraController {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            held: [false; 4],
        }
    }

    pub fn set_pressed(&mut self, key: MoveKey, pressed: bool) {
        self.held[key.index()] = pressed;
    }

    pub fn is_pressed(&self, key: MoveKey) -> bool {
        self.held[key.index()]
    }

    /// Drops every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }

    /// Unit movement direction in world space, or zero when nothing (or only
    /// opposing keys) is held.
    pub fn direction(&self, camera: &CameraState) -> Vector3 {
        let axis = |pos: MoveKey, neg: MoveKey| {
            f32::from(u8::from(self.is_pressed(pos))) - f32::from(u8::from(self.is_pressed(neg)))
        };
        let forward = axis(MoveKey::Forward, MoveKey::Backward);
        let right = axis(MoveKey::Right, MoveKey::Left);
        (camera.forward() * forward + camera.right() * right).norm()
    }

    /// Moves the camera for one frame. Returns whether it moved.
    pub fn update(&self, camera: &mut CameraState, dt: Duration) -> bool {
        let step = self.direction(camera) * (self.speed * dt.as_secs_f32());
        if step == Vector3::ZERO {
            return false;
        }
        let moved = camera.position + step;
        camera.position.assign_from(&moved);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_codes() {
        assert_eq!(MoveKey::from_code("KeyW"), Some(MoveKey::Forward));
        assert_eq!(MoveKey::from_code("KeyD"), Some(MoveKey::Right));
        assert_eq!(MoveKey::from_code("KeyQ"), None);
    }

    #[test]
    fn idle_controller_does_not_move() {
        let controller = CameraController::default();
        let mut camera = CameraState::default();
        assert!(!controller.update(&mut camera, Duration::from_secs(1)));
        assert_eq!(camera.position, Vector3::ZERO);
    }

    #[test]
    fn forward_moves_down_negative_z() {
        let mut controller = CameraController::new(4.0);
        controller.set_pressed(MoveKey::Forward, true);
        let mut camera = CameraState::default();
        assert!(controller.update(&mut camera, Duration::from_millis(500)));
        assert!(camera.position.approx_eq(Vector3::new(0.0, 0.0, -2.0)));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut controller = CameraController::default();
        controller.set_pressed(MoveKey::Left, true);
        controller.set_pressed(MoveKey::Right, true);
        assert_eq!(controller.direction(&CameraState::default()), Vector3::ZERO);
    }

    #[test]
    fn diagonal_is_normalized() {
        let mut controller = CameraController::default();
        controller.set_pressed(MoveKey::Forward, true);
        controller.set_pressed(MoveKey::Right, true);
        let dir = controller.direction(&CameraState::default());
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert!(dir.is_equal(Vector3::new(h, 0.0, -h), 1e-6));
    }

    #[test]
    fn release_all_clears_state() {
        let mut controller = CameraController::default();
        for key in MoveKey::ALL {
            controller.set_pressed(key, true);
        }
        controller.release_all();
        assert!(MoveKey::ALL.iter().all(|&k| !controller.is_pressed(k)));
    }

    #[test]
    fn strafing_follows_camera_yaw() {
        let mut controller = CameraController::new(1.0);
        controller.set_pressed(MoveKey::Right, true);
        let mut camera = CameraState {
            rotation: Vector3::new(0.0, std::f32::consts::PI, 0.0),
            ..CameraState::default()
        };
        controller.update(&mut camera, Duration::from_secs(1));
        assert!(camera.position.is_equal(Vector3::new(-1.0, 0.0, 0.0), 1e-6));
    }
}
