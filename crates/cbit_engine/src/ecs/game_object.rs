//! Borrowed facade over one entity
//!
//! A `GameObject` is a `(Entity, &mut Registry)` pair. It does not own the
//! entity; dropping it leaves the entity alive.

use super::components::{IdComponent, TagComponent};
use super::{Component, EcsError, Entity, Registry};

/// Convenience handle for adding and reading one entity's components
#[derive(Debug)]
pub struct GameObject<'r> {
    entity: Entity,
    registry: &'r mut Registry,
}

impl<'r> GameObject<'r> {
    /// Bind an entity to the registry that owns it
    pub fn new(entity: Entity, registry: &'r mut Registry) -> Self {
        Self { entity, registry }
    }

    /// Underlying entity handle
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Whether the entity is still alive
    pub fn is_valid(&self) -> bool {
        self.registry.valid(self.entity)
    }

    /// Add a component
    ///
    /// Adding a type the entity already has keeps the existing value, logs a
    /// warning and returns the existing component.
    pub fn add_component<T: Component>(&mut self, component: T) -> Result<&mut T, EcsError> {
        self.registry.emplace(self.entity, component)
    }

    /// Add a component, replacing any existing one of the same type
    pub fn add_or_replace_component<T: Component>(
        &mut self,
        component: T,
    ) -> Result<&mut T, EcsError> {
        self.registry.emplace_or_replace(self.entity, component)
    }

    /// Borrow a component
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.registry.get(self.entity)
    }

    /// Mutably borrow a component
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.registry.get_mut(self.entity)
    }

    /// Borrow a component that must be present
    pub fn component<T: Component>(&self) -> Result<&T, EcsError> {
        self.registry.require(self.entity)
    }

    /// Whether the entity carries a `T`
    pub fn has_component<T: Component>(&self) -> bool {
        self.registry.has::<T>(self.entity)
    }

    /// Detach and return a component
    pub fn remove_component<T: Component>(&mut self) -> Option<T> {
        self.registry.remove(self.entity)
    }

    /// Tag text, if tagged
    pub fn tag(&self) -> Option<&str> {
        self.get_component::<TagComponent>().map(|tag| tag.tag.as_str())
    }

    /// Persistent identifier, if assigned
    pub fn uuid(&self) -> Option<&str> {
        self.get_component::<IdComponent>().map(|id| id.uuid.as_str())
    }

    /// Destroy the entity and consume the handle
    pub fn destroy(self) -> bool {
        self.registry.destroy(self.entity)
    }
}
