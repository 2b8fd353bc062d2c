//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of camera helpers the engine
//! needs. All matrices follow the OpenGL right-handed convention: Y-up, the
//! camera looks down -Z and clip-space depth spans [-1, 1].

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (also used for RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// World up axis shared by every camera in the engine
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Build a rotation from Euler angles given in degrees (X, Y, Z)
    pub fn quat_from_euler_degrees(euler: &Vec3) -> Quat {
        Quat::from_euler_angles(
            deg_to_rad(euler.x),
            deg_to_rad(euler.y),
            deg_to_rad(euler.z),
        )
    }
}

/// Spherical orbit helpers.
///
/// The engine has exactly one orbit convention: `yaw`/`pitch` describe the
/// direction the camera *looks*, and the eye sits `distance` units behind the
/// target along that direction.
pub mod orbit {
    use super::{utils::deg_to_rad, Vec3};

    /// Unit view direction for the given yaw and pitch (degrees)
    pub fn direction(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
        let yaw = deg_to_rad(yaw_degrees);
        let pitch = deg_to_rad(pitch_degrees);
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
    }

    /// Eye position for an orbit around `target`
    pub fn eye_position(
        target: &Vec3,
        distance: f32,
        yaw_degrees: f32,
        pitch_degrees: f32,
    ) -> Vec3 {
        target - direction(yaw_degrees, pitch_degrees) * distance
    }

    /// Euler rotation (degrees) that keeps a Transform in sync with the orbit pose
    pub fn euler_degrees(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
        Vec3::new(-pitch_degrees, -yaw_degrees + 90.0, 0.0)
    }
}

/// Extension trait for Mat4 with camera matrix constructors
pub trait Mat4Ext {
    /// Create a perspective projection matrix (`fov_y` in radians)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a look-at view matrix
    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
        // An eye sitting on its target has no forward axis
        if (target - eye).norm_squared() <= f32::EPSILON {
            return Mat4::new_translation(&-eye);
        }
        Mat4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
    }
}
