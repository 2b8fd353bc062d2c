//! Entity registry and typed component storage
//!
//! Every component type gets its own `SecondaryMap` keyed by [`Entity`], so
//! lookups are O(1) and a destroyed entity's components are dropped together
//! with its slot. Iteration order follows slot order, which is stable between
//! structural changes.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use slotmap::secondary::Entry;
use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

use super::{Component, Entity, Query};

/// Errors raised by registry operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The handle was destroyed or never belonged to this registry
    #[error("Entity {0:?} is not alive")]
    StaleEntity(Entity),

    /// A required component is absent
    #[error("Entity {entity:?} has no {component} component")]
    MissingComponent {
        /// Entity that was queried
        entity: Entity,
        /// Type name of the missing component
        component: &'static str,
    },
}

trait ComponentStore {
    fn remove_entity(&mut self, entity: Entity);
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Storage<T: Component> {
    components: SecondaryMap<Entity, T>,
}

impl<T: Component> ComponentStore for Storage<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.components.remove(entity);
    }

    fn clear(&mut self) {
        self.components.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Owner of entity lifetimes and component data
pub struct Registry {
    entities: SlotMap<Entity, ()>,
    storages: HashMap<TypeId, Box<dyn ComponentStore>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            storages: HashMap::new(),
        }
    }

    /// Create a new entity with no components
    pub fn create(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Destroy an entity and every component attached to it
    ///
    /// Returns `false` when the handle was already stale.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        for storage in self.storages.values_mut() {
            storage.remove_entity(entity);
        }
        true
    }

    /// Whether `entity` is currently alive
    pub fn valid(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate live entities in slot order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Destroy every entity; all outstanding handles become stale
    pub fn clear(&mut self) {
        self.entities.clear();
        for storage in self.storages.values_mut() {
            storage.clear();
        }
    }

    /// Attach a component to `entity`
    ///
    /// Attaching a type the entity already has keeps the existing value,
    /// logs a warning and returns the existing component.
    pub fn emplace<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<&mut T, EcsError> {
        if !self.valid(entity) {
            return Err(EcsError::StaleEntity(entity));
        }

        match self.storage_mut::<T>().entry(entity) {
            Some(Entry::Occupied(existing)) => {
                log::warn!(
                    "Entity {:?} already has a {} component; keeping the existing one",
                    entity,
                    std::any::type_name::<T>()
                );
                Ok(existing.into_mut())
            }
            Some(Entry::Vacant(slot)) => Ok(slot.insert(component)),
            None => Err(EcsError::StaleEntity(entity)),
        }
    }

    /// Attach a component, overwriting any existing value of the same type
    pub fn emplace_or_replace<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<&mut T, EcsError> {
        if !self.valid(entity) {
            return Err(EcsError::StaleEntity(entity));
        }

        match self.storage_mut::<T>().entry(entity) {
            Some(Entry::Occupied(mut existing)) => {
                *existing.get_mut() = component;
                Ok(existing.into_mut())
            }
            Some(Entry::Vacant(slot)) => Ok(slot.insert(component)),
            None => Err(EcsError::StaleEntity(entity)),
        }
    }

    /// Borrow a component
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.valid(entity) {
            return None;
        }
        self.storage::<T>()?.get(entity)
    }

    /// Mutably borrow a component
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.valid(entity) {
            return None;
        }
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<Storage<T>>()?
            .components
            .get_mut(entity)
    }

    /// Borrow a component that must be present
    pub fn require<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        if !self.valid(entity) {
            return Err(EcsError::StaleEntity(entity));
        }
        self.get::<T>(entity).ok_or(EcsError::MissingComponent {
            entity,
            component: std::any::type_name::<T>(),
        })
    }

    /// Whether `entity` carries a `T`
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// Detach and return a component
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.valid(entity) {
            return None;
        }
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<Storage<T>>()?
            .components
            .remove(entity)
    }

    /// Entities carrying every component in `Q`, in slot order
    ///
    /// The result is a snapshot, so callers may mutate components of the
    /// returned entities while walking it.
    pub fn view<Q: Query>(&self) -> Vec<Entity> {
        self.entities.keys().filter(|&entity| Q::matches(self, entity)).collect()
    }

    /// Iterate every `(entity, component)` pair of one type
    pub fn query<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.storage::<T>().into_iter().flat_map(SecondaryMap::iter)
    }

    /// Number of entities carrying a `T`
    pub fn count<T: Component>(&self) -> usize {
        self.storage::<T>().map_or(0, SecondaryMap::len)
    }

    fn storage<T: Component>(&self) -> Option<&SecondaryMap<Entity, T>> {
        self.storages
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<Storage<T>>()
            .map(|storage| &storage.components)
    }

    fn storage_mut<T: Component>(&mut self) -> &mut SecondaryMap<Entity, T> {
        let store = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Storage::<T> { components: SecondaryMap::new() }));

        match store.as_any_mut().downcast_mut::<Storage<T>>() {
            Some(storage) => &mut storage.components,
            None => unreachable!("component storage is keyed by its own TypeId"),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.entities.len())
            .field("component_types", &self.storages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health(i32);
    impl Component for Health {}

    #[derive(Debug, Clone, PartialEq)]
    struct Speed(f32);
    impl Component for Speed {}

    #[test]
    fn test_create_and_destroy() {
        let mut registry = Registry::new();
        let entity = registry.create();
        assert!(registry.valid(entity));
        assert_eq!(registry.len(), 1);

        assert!(registry.destroy(entity));
        assert!(!registry.valid(entity));
        assert!(!registry.destroy(entity));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reused_slot_does_not_revive_stale_handle() {
        let mut registry = Registry::new();
        let first = registry.create();
        registry.emplace(first, Health(10)).unwrap();
        registry.destroy(first);

        let second = registry.create();
        assert_ne!(first, second);
        assert!(!registry.valid(first));
        assert!(registry.get::<Health>(first).is_none());
        assert!(registry.get::<Health>(second).is_none());
    }

    #[test]
    fn test_emplace_duplicate_keeps_existing() {
        let mut registry = Registry::new();
        let entity = registry.create();
        registry.emplace(entity, Health(10)).unwrap();

        let existing = registry.emplace(entity, Health(99)).unwrap();
        assert_eq!(*existing, Health(10));
        assert_eq!(registry.count::<Health>(), 1);
    }

    #[test]
    fn test_emplace_or_replace_overwrites() {
        let mut registry = Registry::new();
        let entity = registry.create();
        registry.emplace(entity, Health(10)).unwrap();
        registry.emplace_or_replace(entity, Health(99)).unwrap();
        assert_eq!(registry.get::<Health>(entity), Some(&Health(99)));
    }

    #[test]
    fn test_emplace_on_stale_entity_fails() {
        let mut registry = Registry::new();
        let entity = registry.create();
        registry.destroy(entity);
        assert_eq!(registry.emplace(entity, Health(1)).unwrap_err(), EcsError::StaleEntity(entity));
    }

    #[test]
    fn test_remove_component() {
        let mut registry = Registry::new();
        let entity = registry.create();
        registry.emplace(entity, Speed(2.0)).unwrap();
        assert_eq!(registry.remove::<Speed>(entity), Some(Speed(2.0)));
        assert!(!registry.has::<Speed>(entity));
        assert_eq!(registry.remove::<Speed>(entity), None);
    }

    #[test]
    fn test_require_reports_missing_component() {
        let mut registry = Registry::new();
        let entity = registry.create();
        let err = registry.require::<Health>(entity).unwrap_err();
        assert!(matches!(err, EcsError::MissingComponent { .. }));
    }

    #[test]
    fn test_view_matches_all_components() {
        let mut registry = Registry::new();
        let both = registry.create();
        let only_health = registry.create();
        let only_speed = registry.create();
        registry.emplace(both, Health(1)).unwrap();
        registry.emplace(both, Speed(1.0)).unwrap();
        registry.emplace(only_health, Health(2)).unwrap();
        registry.emplace(only_speed, Speed(2.0)).unwrap();

        assert_eq!(registry.view::<(Health, Speed)>(), vec![both]);
        assert_eq!(registry.view::<(Health,)>(), vec![both, only_health]);
        assert_eq!(registry.query::<Speed>().count(), 2);
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut registry = Registry::new();
        let a = registry.create();
        let b = registry.create();
        registry.emplace(a, Health(1)).unwrap();

        registry.clear();
        assert!(!registry.valid(a));
        assert!(!registry.valid(b));
        assert_eq!(registry.count::<Health>(), 0);
        assert!(registry.is_empty());
    }
}
