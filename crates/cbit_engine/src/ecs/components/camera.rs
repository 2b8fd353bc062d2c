//! Camera component

use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Perspective camera that orbits a target point
///
/// `yaw` and `pitch` (degrees) give the direction the camera looks; the eye
/// sits `distance` units behind `target` along that direction. The camera
/// system derives the owning entity's transform from these values every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraComponent {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clip plane distance
    pub near_clip: f32,
    /// Far clip plane distance
    pub far_clip: f32,
    /// Only primary cameras are considered when choosing the active camera
    pub is_primary: bool,
    /// Orbit target in world space
    pub target: Vec3,
    /// Distance from the eye to the target
    pub distance: f32,
    /// Heading in degrees; 0 looks down +X, -90 looks down -Z
    pub yaw: f32,
    /// Elevation in degrees; positive looks up
    pub pitch: f32,
}

impl Component for CameraComponent {}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near_clip: 0.1,
            far_clip: 1000.0,
            is_primary: true,
            target: Vec3::zeros(),
            distance: 10.0,
            yaw: -90.0,
            pitch: -20.0,
        }
    }
}

impl CameraComponent {
    /// Builder: projection parameters
    pub fn with_perspective(mut self, fov: f32, near_clip: f32, far_clip: f32) -> Self {
        self.fov = fov;
        self.near_clip = near_clip;
        self.far_clip = far_clip;
        self
    }

    /// Builder: orbit pose
    pub fn with_orbit(mut self, target: Vec3, distance: f32, yaw: f32, pitch: f32) -> Self {
        self.target = target;
        self.distance = distance;
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Builder: primary flag
    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    /// Eye position implied by the orbit parameters
    pub fn eye_position(&self) -> Vec3 {
        crate::foundation::math::orbit::eye_position(
            &self.target,
            self.distance,
            self.yaw,
            self.pitch,
        )
    }
}
