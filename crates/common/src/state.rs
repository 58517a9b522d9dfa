use aphrodite_math::{Matrix4x4, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Renderer-wide settings edited from the developer overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineState {
    /// Linear RGB in `[0, 1]`.
    pub clear_color: Vector3,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            clear_color: Vector3::ZERO,
        }
    }
}

impl EngineState {
    pub fn set_clear_color(&mut self, color: Vector3) {
        self.clear_color.assign_from(&color);
    }

    /// Clear color scaled to `0..=255` per channel, clamped.
    pub fn clear_color_rgb8(&self) -> [u8; 3] {
        let c = self.clear_color * 255.0;
        [c.r(), c.g(), c.b()].map(|v| v.round().clamp(0.0, 255.0) as u8)
    }

    /// Opaque RGBA clear value.
    pub fn clear_rgba(&self) -> Vector4 {
        Vector4::new(self.clear_color.r(), self.clear_color.g(), self.clear_color.b(), 1.0)
    }
}

/// Main camera: position, Euler rotation (radians) and projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraState {
    pub position: Vector3,
    pub rotation: Vector3,
    pub fovy: f32,
    pub near: f32,
    /// `0.0` collapses every depth to zero; see `Matrix4x4::perspective`.
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            rotation: Vector3::ZERO,
            fovy: std::f32::consts::FRAC_PI_2,
            near: 1.0,
            far: 0.0,
        }
    }
}

impl CameraState {
    pub fn view(&self) -> Matrix4x4 {
        Matrix4x4::view(self.position, self.rotation)
    }

    pub fn projection(&self, aspect_ratio: f32) -> Matrix4x4 {
        Matrix4x4::perspective(self.fovy, aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self, aspect_ratio: f32) -> Matrix4x4 {
        self.projection(aspect_ratio) * self.view()
    }

    /// Camera orientation, the rotation part of its world transform.
    pub fn orientation(&self) -> Matrix4x4 {
        Matrix4x4::rotation_zyx(self.rotation)
    }

    /// World-space viewing direction (the camera looks down its local -Z).
    pub fn forward(&self) -> Vector3 {
        Vector3::from(self.orientation() * Vector4::direction(-Vector3::Z))
    }

    pub fn right(&self) -> Vector3 {
        Vector3::from(self.orientation() * Vector4::direction(Vector3::X))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn clear_color_conversions() {
        let mut engine = EngineState::default();
        engine.set_clear_color(Vector3::new(1.0, 0.5, 0.0));
        assert_eq!(engine.clear_color_rgb8(), [255, 128, 0]);
        assert_eq!(engine.clear_rgba(), Vector4::new(1.0, 0.5, 0.0, 1.0));

        engine.set_clear_color(Vector3::new(2.0, -1.0, 0.2));
        assert_eq!(engine.clear_color_rgb8(), [255, 0, 51]);
    }

    #[test]
    fn camera_defaults() {
        let camera = CameraState::default();
        assert_eq!(camera.fovy, FRAC_PI_2);
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 0.0);
        assert_eq!(camera.view(), Matrix4x4::IDENTITY);
    }

    #[test]
    fn view_projection_composes_projection_after_view() {
        let camera = CameraState {
            position: Vector3::new(0.0, 0.0, 2.0),
            ..CameraState::default()
        };
        let vp = camera.view_projection(1.0);
        assert_eq!(vp, camera.projection(1.0) * camera.view());

        let clip = vp * Vector4::point(Vector3::ZERO);
        assert!(clip.is_equal(Vector4::new(0.0, 0.0, 0.0, 2.0), 1e-6));
    }

    #[test]
    fn basis_vectors_follow_rotation() {
        let camera = CameraState::default();
        assert!(camera.forward().approx_eq(-Vector3::Z));
        assert!(camera.right().approx_eq(Vector3::X));

        // Turning left by 90 degrees about +Y looks down -X.
        let turned = CameraState {
            rotation: Vector3::new(0.0, FRAC_PI_2, 0.0),
            ..CameraState::default()
        };
        assert!(turned.forward().is_equal(-Vector3::X, 1e-6));
        assert!(turned.right().is_equal(-Vector3::Z, 1e-6));
    }

    #[test]
    fn view_maps_forward_to_negative_z() {
        let camera = CameraState {
            position: Vector3::new(1.0, 2.0, 3.0),
            rotation: Vector3::new(0.3, -0.8, 0.1),
            ..CameraState::default()
        };
        let ahead = Vector4::point(camera.position + camera.forward() * 5.0);
        let in_view = camera.view() * ahead;
        assert!(in_view.is_equal(Vector4::new(0.0, 0.0, -5.0, 1.0), 1e-5));
    }
}
