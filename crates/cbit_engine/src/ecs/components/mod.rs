//! Built-in component types

pub mod camera;
pub mod identity;
pub mod lighting;
pub mod renderable;
pub mod transform;

pub use camera::CameraComponent;
pub use identity::{IdComponent, TagComponent};
pub use lighting::{
    DirectionalLightComponent, LightFactory, PointLightComponent, SpotLightComponent,
};
pub use renderable::{CubeComponent, QuadComponent, Renderable, TextureComponent};
pub use transform::TransformComponent;
