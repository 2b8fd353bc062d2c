//! Transform component
//!
//! Rotation is stored as Euler angles in degrees so that it round-trips
//! through scene files unchanged. The rotation quaternion is derived on demand.

use crate::ecs::Component;
use crate::foundation::math::{utils, Mat4, Quat, Vec3};

/// Position, orientation and scale of an entity in world space
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// Euler angles in degrees, applied about X, Y then Z
    pub rotation: Vec3,

    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create from full transform specification
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder: set rotation in degrees
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation as a unit quaternion
    pub fn rotation_quat(&self) -> Quat {
        utils::quat_from_euler_degrees(&self.rotation)
    }

    /// Model matrix: translation * rotation * scale
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation_quat().to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        assert_relative_eq!(TransformComponent::default().to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_matrix_applies_scale_then_rotation_then_translation() {
        let transform = TransformComponent::new(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 90.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        );

        let moved = transform.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved.coords, Vec3::new(10.0, 0.0, -2.0), epsilon = 1e-5);
    }
}
