//! Built-in systems

pub mod camera_system;
pub mod lighting;
pub mod rendering_system;

pub use camera_system::CameraSystem;
pub use lighting::LightingSystem;
pub use rendering_system::RenderingSystem;
