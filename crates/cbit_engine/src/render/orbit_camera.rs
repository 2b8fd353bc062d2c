//! Free-standing orbit camera for editor-style viewports
//!
//! Uses the same orbit convention as the ECS camera: `yaw`/`pitch` are the
//! viewing direction and the eye sits `distance` units behind the target.

use crate::foundation::math::{orbit, utils, Mat4, Mat4Ext, Vec3, WORLD_UP};

use super::CameraMatrices;

/// Degrees of rotation per pixel of mouse drag
const DRAG_SENSITIVITY: f32 = 0.25;
/// Distance change per scroll step
const SCROLL_SENSITIVITY: f32 = 0.5;
/// Closest the eye may get to the target
const MIN_DISTANCE: f32 = 1.0;
/// Pitch limit, keeps the view off the poles
const PITCH_LIMIT: f32 = 89.0;

/// Mouse and keyboard driven orbit camera
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    target: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl OrbitCamera {
    /// Camera ten units back from the origin, looking down -Z and slightly down
    pub fn new() -> Self {
        Self {
            target: Vec3::zeros(),
            distance: 10.0,
            yaw: -90.0,
            pitch: -20.0,
            fov: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Rotate around the target; pitch is clamped to ±89 degrees
    pub fn on_mouse_drag(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += delta_x * DRAG_SENSITIVITY;
        self.pitch = (self.pitch + delta_y * DRAG_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom toward the target; never closer than one unit
    pub fn on_mouse_scroll(&mut self, delta_y: f32) {
        self.distance = (self.distance - delta_y * SCROLL_SENSITIVITY).max(MIN_DISTANCE);
    }

    /// Pan the target in the camera's right/up plane
    ///
    /// Pan speed scales with distance so the motion feels the same at any zoom.
    pub fn on_keyboard(&mut self, delta_time: f32, left: bool, right: bool, up: bool, down: bool) {
        let pan = self.distance * delta_time;
        let front = orbit::direction(self.yaw, self.pitch);
        let cam_right = front.cross(&WORLD_UP).normalize();
        let cam_up = cam_right.cross(&front).normalize();

        if left {
            self.target -= cam_right * pan;
        }
        if right {
            self.target += cam_right * pan;
        }
        if up {
            self.target += cam_up * pan;
        }
        if down {
            self.target -= cam_up * pan;
        }
    }

    /// Call whenever the framebuffer size changes
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect > 0.0 && aspect.is_finite() {
            self.aspect = aspect;
        }
    }

    /// Move the orbit target
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Orbit target
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Eye to target distance
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Heading in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Elevation in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Eye position
    pub fn position(&self) -> Vec3 {
        orbit::eye_position(&self.target, self.distance, self.yaw, self.pitch)
    }

    /// World to view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(&self.position(), &self.target, &WORLD_UP)
    }

    /// View to clip transform
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(utils::deg_to_rad(self.fov), self.aspect, self.near, self.far)
    }

    /// Both matrices plus the eye, ready for a backend
    pub fn matrices(&self) -> CameraMatrices {
        CameraMatrices {
            view: self.view_matrix(),
            projection: self.projection_matrix(),
            position: self.position(),
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
