//! # Camera System
//!
//! Resolves the active camera once per render call. The first entity in view
//! order with both a camera and a transform whose camera is primary wins.
//! Several primary cameras are allowed; keeping exactly one is the caller's
//! job and is not validated here.
//!
//! The camera's transform is derived from its orbit parameters on every
//! resolution, so anything reading `TransformComponent` sees the same pose
//! the renderer uses.

use crate::ecs::components::{CameraComponent, TransformComponent};
use crate::ecs::{Entity, Registry};
use crate::foundation::math::{orbit, utils, Mat4, Mat4Ext, Vec3, WORLD_UP};
use crate::render::{CameraMatrices, Viewport};

/// Active-camera resolver
#[derive(Debug, Clone)]
pub struct CameraSystem {
    viewport: Viewport,
    last: CameraMatrices,
    active_camera: Option<Entity>,
}

impl CameraSystem {
    /// Create a camera system for the default viewport
    pub fn new() -> Self {
        Self::with_viewport(Viewport::default())
    }

    /// Create a camera system for a specific viewport
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            last: CameraMatrices::identity(),
            active_camera: None,
        }
    }

    /// Record the framebuffer size used for the projection aspect ratio
    pub fn update_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pick the active camera, sync its transform and build the matrices
    ///
    /// Returns identity matrices when no primary camera exists.
    pub fn resolve(&mut self, registry: &mut Registry) -> CameraMatrices {
        let active = registry
            .view::<(CameraComponent, TransformComponent)>()
            .into_iter()
            .find_map(|entity| {
                registry
                    .get::<CameraComponent>(entity)
                    .filter(|camera| camera.is_primary)
                    .map(|camera| (entity, camera.clone()))
            });

        let Some((entity, camera)) = active else {
            if self.active_camera.take().is_some() {
                log::debug!("No primary camera; falling back to identity matrices");
            }
            self.last = CameraMatrices::identity();
            return self.last;
        };

        let position =
            orbit::eye_position(&camera.target, camera.distance, camera.yaw, camera.pitch);
        if let Some(transform) = registry.get_mut::<TransformComponent>(entity) {
            transform.position = position;
            transform.rotation = orbit::euler_degrees(camera.yaw, camera.pitch);
        }

        if self.active_camera != Some(entity) {
            log::debug!("Active camera is now {:?}", entity);
            self.active_camera = Some(entity);
        }

        self.last = CameraMatrices {
            view: Mat4::look_at(&position, &camera.target, &WORLD_UP),
            projection: self.projection_for(&camera),
            position,
        };
        log::trace!("Camera at {:?} looking at {:?}", position, camera.target);
        self.last
    }

    fn projection_for(&self, camera: &CameraComponent) -> Mat4 {
        let valid = camera.fov > 0.0
            && camera.near_clip > 0.0
            && camera.far_clip - camera.near_clip > f32::EPSILON;
        if !valid {
            log::warn!(
                "Camera has degenerate projection (fov {}, near {}, far {}); using identity",
                camera.fov,
                camera.near_clip,
                camera.far_clip
            );
            return Mat4::identity();
        }
        Mat4::perspective(
            utils::deg_to_rad(camera.fov),
            self.viewport.aspect_ratio(),
            camera.near_clip,
            camera.far_clip,
        )
    }

    /// Entity chosen by the last resolution
    pub fn active_camera(&self) -> Option<Entity> {
        self.active_camera
    }

    /// Eye position from the last resolution; origin when no camera was active
    pub fn active_camera_position(&self) -> Vec3 {
        self.last.position
    }

    /// View matrix from the last resolution
    pub fn last_view_matrix(&self) -> Mat4 {
        self.last.view
    }

    /// Projection matrix from the last resolution
    pub fn last_projection_matrix(&self) -> Mat4 {
        self.last.projection
    }

    /// All matrices from the last resolution
    pub fn last_matrices(&self) -> CameraMatrices {
        self.last
    }
}

impl Default for CameraSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spawn_camera(registry: &mut Registry, camera: CameraComponent) -> Entity {
        let entity = registry.create();
        registry.emplace(entity, TransformComponent::default()).unwrap();
        registry.emplace(entity, camera).unwrap();
        entity
    }

    #[test]
    fn test_no_camera_yields_identity() {
        let mut registry = Registry::new();
        let mut system = CameraSystem::new();
        let matrices = system.resolve(&mut registry);
        assert_eq!(matrices, CameraMatrices::identity());
        assert_eq!(system.active_camera(), None);
    }

    #[test]
    fn test_non_primary_camera_is_ignored() {
        let mut registry = Registry::new();
        spawn_camera(&mut registry, CameraComponent::default().with_primary(false));
        let mut system = CameraSystem::new();
        assert_eq!(system.resolve(&mut registry).view, Mat4::identity());
    }

    #[test]
    fn test_camera_without_transform_is_ignored() {
        let mut registry = Registry::new();
        let entity = registry.create();
        registry.emplace(entity, CameraComponent::default()).unwrap();
        let mut system = CameraSystem::new();
        assert_eq!(system.resolve(&mut registry), CameraMatrices::identity());
    }

    #[test]
    fn test_first_primary_camera_wins() {
        let mut registry = Registry::new();
        spawn_camera(&mut registry, CameraComponent::default().with_primary(false));
        let first = spawn_camera(&mut registry, CameraComponent::default());
        spawn_camera(&mut registry, CameraComponent::default());

        let mut system = CameraSystem::new();
        system.resolve(&mut registry);
        assert_eq!(system.active_camera(), Some(first));
    }

    #[test]
    fn test_transform_follows_orbit() {
        let mut registry = Registry::new();
        let camera =
            CameraComponent::default().with_orbit(Vec3::new(0.0, 1.0, 0.0), 4.0, 90.0, 0.0);
        let entity = spawn_camera(&mut registry, camera);

        let mut system = CameraSystem::new();
        system.resolve(&mut registry);

        let transform = registry.get::<TransformComponent>(entity).unwrap();
        assert_relative_eq!(transform.position, Vec3::new(0.0, 1.0, -4.0), epsilon = 1e-5);
        assert_relative_eq!(transform.rotation, Vec3::new(0.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(system.active_camera_position(), transform.position);
    }

    #[test]
    fn test_zero_height_viewport_does_not_produce_nan() {
        let mut registry = Registry::new();
        spawn_camera(&mut registry, CameraComponent::default());
        let mut system = CameraSystem::with_viewport(Viewport::new(800, 0));
        let matrices = system.resolve(&mut registry);
        assert!(matrices.projection.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_degenerate_clip_planes_fall_back_to_identity_projection() {
        let mut registry = Registry::new();
        spawn_camera(&mut registry, CameraComponent::default().with_perspective(45.0, 1.0, 1.0));
        let mut system = CameraSystem::new();
        assert_eq!(system.resolve(&mut registry).projection, Mat4::identity());
    }
}
