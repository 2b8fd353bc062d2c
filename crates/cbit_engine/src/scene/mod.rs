//! Scene lifecycle, persistence and management
//!
//! A [`Scene`] owns one [`World`](crate::ecs::World) and moves through
//! `setup → update/render … → cleanup`. The [`SceneManager`] maps names to
//! scenes and defers scene switches to the start of the next render. Scenes
//! persist as JSON [`SceneDocument`]s through the [`SceneSerializer`].

pub mod document;
mod error;
mod lifecycle;
pub mod scene_manager;
pub mod serializer;
pub mod splash;

#[cfg(test)]
mod tests;

pub use document::{EntityRecord, SceneDocument, SCENE_DOCUMENT_TYPE};
pub use error::SceneError;
pub use lifecycle::{BasicScene, Scene, SceneState};
pub use scene_manager::{SceneManager, SPLASH_SCENE_NAME};
pub use serializer::SceneSerializer;
pub use splash::SplashScene;
