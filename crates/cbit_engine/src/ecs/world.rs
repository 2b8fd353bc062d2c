//! # World
//!
//! A registry plus the systems that give it behavior. Every game object made
//! through [`World::create_game_object`] carries a tag and a fresh UUID.

use super::components::{IdComponent, TagComponent};
use super::systems::{CameraSystem, LightingSystem, RenderingSystem};
use super::{Entity, GameObject, Registry, System};
use crate::render::{RenderBackend, Viewport};

/// Container for one scene's entities and systems
pub struct World {
    registry: Registry,
    camera_system: CameraSystem,
    lighting_system: LightingSystem,
    rendering_system: RenderingSystem,
    systems: Vec<Box<dyn System>>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            camera_system: CameraSystem::new(),
            lighting_system: LightingSystem::new(),
            rendering_system: RenderingSystem::new(),
            systems: Vec::new(),
        }
    }

    /// Create an entity with a tag and a freshly generated identifier
    pub fn create_game_object(&mut self, tag: &str) -> GameObject<'_> {
        let entity = self.registry.create();
        // A just-created entity is always alive, so these cannot fail
        let _ = self.registry.emplace(entity, TagComponent::new(tag));
        let _ = self.registry.emplace(entity, IdComponent::generate());
        log::trace!("Created game object '{}' as {:?}", tag, entity);
        GameObject::new(entity, &mut self.registry)
    }

    /// Facade for an existing entity, if it is alive
    pub fn game_object(&mut self, entity: Entity) -> Option<GameObject<'_>> {
        if self.registry.valid(entity) {
            Some(GameObject::new(entity, &mut self.registry))
        } else {
            None
        }
    }

    /// First entity carrying `tag`, in view order
    pub fn find_by_tag(&self, tag: &str) -> Option<Entity> {
        self.registry
            .query::<TagComponent>()
            .find(|(_, component)| component.tag == tag)
            .map(|(entity, _)| entity)
    }

    /// Facade for the first entity carrying `tag`
    pub fn find_game_object(&mut self, tag: &str) -> Option<GameObject<'_>> {
        let entity = self.find_by_tag(tag)?;
        self.game_object(entity)
    }

    /// Destroy an entity and its components
    pub fn destroy_game_object(&mut self, entity: Entity) -> bool {
        self.registry.destroy(entity)
    }

    /// Whether `entity` is alive in this world
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.registry.valid(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.registry.len()
    }

    /// Register a system; systems run in registration order
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        log::debug!("Registered system {}", system.name());
        self.systems.push(Box::new(system));
    }

    /// Number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Advance every registered system
    pub fn update(&mut self, delta_time: f32) {
        for system in &mut self.systems {
            system.update(&mut self.registry, delta_time);
        }
    }

    /// Resolve the camera, apply lights and submit draws for one frame
    ///
    /// Returns the number of draws issued.
    pub fn render(&mut self, renderer: &mut dyn RenderBackend, viewport: Viewport) -> usize {
        self.camera_system.update_viewport(viewport);
        let camera = self.camera_system.resolve(&mut self.registry);

        renderer.begin_frame(&camera);
        let lights = self.lighting_system.build_environment(&self.registry, camera.position);
        renderer.apply_lights(lights);
        let draws = self.rendering_system.submit(&mut self.registry, renderer);
        renderer.end_frame();

        log::trace!("World rendered {} draws", draws);
        draws
    }

    /// Destroy every entity; systems stay registered
    pub fn cleanup(&mut self) {
        self.registry.clear();
    }

    /// Return to a freshly constructed state, keeping the viewport
    ///
    /// Entities and systems are dropped and the camera system forgets the
    /// previous camera.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.systems.clear();
        self.camera_system = CameraSystem::with_viewport(self.camera_system.viewport());
        self.lighting_system = LightingSystem::new();
    }

    /// Underlying registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Underlying registry, mutably
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Camera system state from the last render
    pub fn camera_system(&self) -> &CameraSystem {
        &self.camera_system
    }

    /// Mutable camera system, e.g. to resolve outside of a render
    pub fn camera_system_mut(&mut self) -> &mut CameraSystem {
        &mut self.camera_system
    }

    /// Resolve the active camera without rendering
    pub fn resolve_camera(&mut self) -> crate::render::CameraMatrices {
        self.camera_system.resolve(&mut self.registry)
    }

    /// Lighting system state from the last render
    pub fn lighting_system(&self) -> &LightingSystem {
        &self.lighting_system
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("registry", &self.registry)
            .field("systems", &self.systems.len())
            .finish_non_exhaustive()
    }
}
