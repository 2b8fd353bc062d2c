//! # Rendering contract
//!
//! The engine core never talks to a graphics API directly. Each frame a
//! [`World`](crate::ecs::World) hands a [`RenderBackend`] the camera matrices,
//! the light environment and one [`DrawCommand`] per visible entity, in that
//! order. Concrete backends (a GPU renderer, [`RecordingRenderer`] for tests
//! and headless runs) implement the trait.

pub mod lighting;
pub mod orbit_camera;
pub mod recording;

pub use lighting::{
    DirectionalLight, LightEnvironment, PointLight, SpotLight, MAX_DIRECTIONAL_LIGHTS,
    MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};
pub use orbit_camera::OrbitCamera;
pub use recording::{RecordedFrame, RecordingRenderer};

use crate::ecs::Entity;
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Handle to a texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Built-in meshes the engine can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Unit quad in the XY plane
    Quad,
    /// Unit cube centered on the origin
    Cube,
}

/// Framebuffer dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 when the height is zero (minimized window)
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// View and projection pair for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    /// World to view transform
    pub view: Mat4,
    /// View to clip transform
    pub projection: Mat4,
    /// Eye position in world space
    pub position: Vec3,
}

impl CameraMatrices {
    /// Identity matrices with the eye at the origin
    pub fn identity() -> Self {
        Self {
            view: Mat4::identity(),
            projection: Mat4::identity(),
            position: Vec3::zeros(),
        }
    }

    /// Combined `projection * view`
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl Default for CameraMatrices {
    fn default() -> Self {
        Self::identity()
    }
}

/// A single mesh draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Entity that produced the draw
    pub entity: Entity,
    /// Mesh to draw
    pub mesh: MeshKind,
    /// Model matrix
    pub model: Mat4,
    /// RGBA tint; white when a texture is bound
    pub color: Vec4,
    /// Texture to sample, if any
    pub texture: Option<TextureHandle>,
}

/// Interface every rendering backend implements
pub trait RenderBackend {
    /// Start a frame with the active camera
    fn begin_frame(&mut self, camera: &CameraMatrices);

    /// Upload the frame's lights
    fn apply_lights(&mut self, lights: &LightEnvironment);

    /// Load (or look up) a texture; `None` when the image cannot be loaded
    fn load_texture(&mut self, path: &str) -> Option<TextureHandle>;

    /// Queue one draw
    fn draw(&mut self, command: &DrawCommand);

    /// Finish and present the frame
    fn end_frame(&mut self);
}
