//! # cbit engine
//!
//! Core of a small real-time 3D engine: a generational entity registry with
//! typed components, scenes with a setup/update/render/cleanup lifecycle,
//! JSON scene persistence and a manager that switches between scenes.
//!
//! Rendering and audio are reached through the [`render::RenderBackend`] and
//! [`audio::AudioDevice`] traits, so the core runs headless.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cbit_engine::prelude::*;
//!
//! let mut engine = Engine::new(EngineConfig::default(), RecordingRenderer::new());
//! engine.scene_manager_mut().create_scene("default_scene").unwrap();
//!
//! {
//!     let world = engine.scene_manager_mut().active_scene_mut().unwrap().world_mut();
//!     let mut cube = world.create_game_object("Cube");
//!     cube.add_component(TransformComponent::default()).unwrap();
//!     cube.add_component(CubeComponent::default()).unwrap();
//! }
//!
//! while engine.is_running() && engine.frame_count() < 60 {
//!     engine.frame(1.0 / 60.0);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod audio;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod project;
pub mod render;
pub mod scene;

mod engine;

pub use engine::{Engine, EngineError, EngineEvent};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        audio::{AudioDevice, AudioError, SharedAudio, SilentAudio},
        config::{Config, EngineConfig, SceneSettings},
        ecs::{
            components::{
                CameraComponent, CubeComponent, DirectionalLightComponent, IdComponent,
                LightFactory, PointLightComponent, QuadComponent, SpotLightComponent, TagComponent,
                TextureComponent, TransformComponent,
            },
            Component, EcsError, Entity, GameObject, Registry, System, World,
        },
        foundation::math::{Mat4, Vec3, Vec4},
        input::{InputState, KeyCode, MouseButton},
        project::{Project, ProjectError},
        render::{CameraMatrices, RecordingRenderer, RenderBackend, Viewport},
        scene::{BasicScene, Scene, SceneError, SceneManager, SceneSerializer, SceneState},
        Engine, EngineError, EngineEvent,
    };
}
